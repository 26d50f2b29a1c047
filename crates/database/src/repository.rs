use crate::document::PlanetDocument;
use crate::error::DbError;
use crate::store::PlanetCollection;
use async_trait::async_trait;
use core_types::Planet;
use mongodb::bson::{doc, oid::ObjectId, Document};

/// Data access for the `planets` collection.
///
/// Callers only ever see `Planet` values and plain string ids. Everything
/// about filters and the native id format stays behind this trait.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PlanetsDao: Send + Sync {
    /// Every stored planet, in whatever order the store yields them.
    async fn find_all(&self) -> Result<Vec<Planet>, DbError>;

    /// The planet with this id. `InvalidId` for malformed ids, `NotFound` when absent.
    async fn find_by_id(&self, id: &str) -> Result<Planet, DbError>;

    /// Planets whose name contains `name`, ignoring case. An empty result is not an error.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Planet>, DbError>;

    /// Stores a new planet and returns the id the store assigned.
    async fn create(&self, planet: &Planet) -> Result<String, DbError>;

    /// Removes the planet with this id. `InvalidId` for malformed ids, `NotFound` when absent.
    async fn delete(&self, id: &str) -> Result<(), DbError>;
}

/// The `PlanetsDao` implementation, generic over the storage seam so the same
/// logic runs against MongoDB, the in-memory store, or a mock.
#[derive(Debug, Clone)]
pub struct PlanetsRepository<C> {
    collection: C,
}

impl<C: PlanetCollection> PlanetsRepository<C> {
    /// Creates a repository over an already-connected collection.
    pub fn new(collection: C) -> Self {
        Self { collection }
    }
}

/// Converts a client-supplied id into the store's native form.
fn parse_id(id: &str) -> Result<ObjectId, DbError> {
    ObjectId::parse_str(id).map_err(|_| {
        tracing::debug!(id, "Rejected malformed planet id.");
        DbError::InvalidId
    })
}

fn id_filter(oid: ObjectId) -> Document {
    doc! { "_id": oid }
}

/// Case-insensitive substring match. The input is escaped so that it is
/// matched literally.
fn name_filter(name: &str) -> Document {
    // PCRE treats a backslash before any non-alphanumeric character as a
    // literal, so `regex::escape` output is safe for MongoDB's engine too.
    doc! { "name": { "$regex": regex::escape(name), "$options": "i" } }
}

#[async_trait]
impl<C: PlanetCollection> PlanetsDao for PlanetsRepository<C> {
    async fn find_all(&self) -> Result<Vec<Planet>, DbError> {
        let documents = self.collection.find(doc! {}).await?;
        Ok(documents.into_iter().map(Planet::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Planet, DbError> {
        let oid = parse_id(id)?;
        self.collection
            .find_one(id_filter(oid))
            .await?
            .map(Planet::from)
            .ok_or(DbError::NotFound)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Planet>, DbError> {
        let documents = self.collection.find(name_filter(name)).await?;
        Ok(documents.into_iter().map(Planet::from).collect())
    }

    async fn create(&self, planet: &Planet) -> Result<String, DbError> {
        match self.collection.insert_one(PlanetDocument::from(planet)).await {
            Ok(oid) => {
                tracing::debug!(name = %planet.name, id = %oid, "Planet created.");
                Ok(oid.to_hex())
            }
            Err(e) => {
                tracing::error!(name = %planet.name, error = %e, "There was an error creating the planet.");
                Err(e)
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<(), DbError> {
        let oid = parse_id(id)?;
        let removed = self.collection.delete_one(id_filter(oid)).await?;
        if removed == 0 {
            return Err(DbError::NotFound);
        }
        tracing::debug!(id, "Planet removed.");
        Ok(())
    }
}
