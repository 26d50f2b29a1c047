use crate::document::PlanetDocument;
use crate::error::DbError;
use crate::store::PlanetCollection;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{oid::ObjectId, Document};
use mongodb::{Collection, Database};

/// Name of the MongoDB collection holding planets.
pub const COLLECTION: &str = "planets";

/// `PlanetCollection` backed by a live MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoCollection {
    collection: Collection<PlanetDocument>,
}

impl MongoCollection {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl PlanetCollection for MongoCollection {
    async fn find(&self, filter: Document) -> Result<Vec<PlanetDocument>, DbError> {
        let cursor = self.collection.find(filter).await?;
        let documents: Vec<PlanetDocument> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<PlanetDocument>, DbError> {
        Ok(self.collection.find_one(filter).await?)
    }

    async fn insert_one(&self, document: PlanetDocument) -> Result<ObjectId, DbError> {
        let result = self.collection.insert_one(document).await?;
        // The driver generates an ObjectId for documents without `_id`.
        result.inserted_id.as_object_id().ok_or_else(|| {
            DbError::Unavailable(format!(
                "store assigned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })
    }

    async fn delete_one(&self, filter: Document) -> Result<u64, DbError> {
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count)
    }
}
