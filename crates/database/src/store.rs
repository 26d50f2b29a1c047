//! The storage seam: the only operations the data-access layer needs from a
//! document store.
//!
//! Filters are plain BSON documents. Implementations decode results into
//! `PlanetDocument`s themselves, so driver cursors never escape this module's
//! implementors.

use crate::document::PlanetDocument;
use crate::error::DbError;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

/// Collection-scoped access to stored planets.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; one instance is shared by every
/// request task.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PlanetCollection: Send + Sync {
    /// Decodes every document matching `filter`, in the store's natural order.
    async fn find(&self, filter: Document) -> Result<Vec<PlanetDocument>, DbError>;

    /// Decodes the first document matching `filter`, or `None`.
    async fn find_one(&self, filter: Document) -> Result<Option<PlanetDocument>, DbError>;

    /// Inserts a document and returns the identifier the store assigned.
    async fn insert_one(&self, document: PlanetDocument) -> Result<ObjectId, DbError>;

    /// Removes at most one matching document and returns how many were removed.
    async fn delete_one(&self, filter: Document) -> Result<u64, DbError>;
}
