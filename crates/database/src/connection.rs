use crate::error::DbError;
use crate::fixtures::seed_if_empty;
use crate::memory::MemoryCollection;
use crate::mongo::MongoCollection;
use crate::repository::{PlanetsDao, PlanetsRepository};
use configuration::{DatabaseSettings, StorageBackend};
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Database};
use std::sync::Arc;

/// Connects to MongoDB and returns a handle to the configured database.
///
/// The server is pinged before returning so that a bad uri or unreachable
/// host fails at startup instead of on the first request.
pub async fn connect(settings: &DatabaseSettings) -> Result<Database, DbError> {
    if settings.uri.trim().is_empty() {
        return Err(DbError::ConnectionConfigError("database uri must be set".to_string()));
    }

    let mut options = ClientOptions::parse(&settings.uri)
        .await
        .map_err(DbError::Connection)?;
    if settings.has_credentials() {
        options.credential = Some(
            Credential::builder()
                .username(settings.username.clone())
                .password(settings.password.clone())
                .build(),
        );
    }

    tracing::info!(database = %settings.database_name, "Initializing a session with the database.");
    let client = Client::with_options(options).map_err(DbError::Connection)?;
    let database = client.database(&settings.database_name);
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(DbError::Connection)?;
    tracing::info!("Connected to MongoDB.");

    Ok(database)
}

/// Builds the data-access layer for whichever backend the settings select.
pub async fn open_planets(settings: &DatabaseSettings) -> Result<Arc<dyn PlanetsDao>, DbError> {
    match settings.backend {
        StorageBackend::Mongo => {
            let database = connect(settings).await?;
            let collection = MongoCollection::new(&database);
            if settings.seed {
                seed_if_empty(&collection).await?;
            }
            Ok(Arc::new(PlanetsRepository::new(collection)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory planet store; data will not survive a restart.");
            let collection = MemoryCollection::new();
            if settings.seed {
                seed_if_empty(&collection).await?;
            }
            Ok(Arc::new(PlanetsRepository::new(collection)))
        }
    }
}
