//! In-process `PlanetCollection` used for local development and tests.
//!
//! It understands exactly the filter shapes that `PlanetsRepository` emits:
//! the empty filter, equality on `_id`, and `{ name: { $regex, $options } }`.
//! Anything else is reported as an unavailable backend rather than silently
//! matching.

use crate::document::PlanetDocument;
use crate::error::DbError;
use crate::store::PlanetCollection;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use regex::RegexBuilder;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryCollection {
    documents: RwLock<Vec<PlanetDocument>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

/// A compiled filter document: every condition must hold.
struct Matcher(Vec<Condition>);

enum Condition {
    Id(ObjectId),
    NameEquals(String),
    NamePattern(regex::Regex),
}

impl Matcher {
    fn compile(filter: &Document) -> Result<Self, DbError> {
        let conditions = filter
            .iter()
            .map(|(field, value)| Condition::compile(field, value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Matcher(conditions))
    }

    fn matches(&self, document: &PlanetDocument) -> bool {
        self.0.iter().all(|condition| condition.matches(document))
    }
}

impl Condition {
    fn compile(field: &str, value: &Bson) -> Result<Self, DbError> {
        match (field, value) {
            ("_id", Bson::ObjectId(oid)) => Ok(Condition::Id(*oid)),
            ("name", Bson::String(name)) => Ok(Condition::NameEquals(name.clone())),
            ("name", Bson::Document(operators)) => {
                let pattern = operators.get_str("$regex").map_err(|_| {
                    DbError::Unavailable(format!("unsupported name filter: {operators}"))
                })?;
                let options = operators.get_str("$options").unwrap_or_default();
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(options.contains('i'))
                    .build()
                    .map_err(|e| DbError::Unavailable(format!("invalid $regex: {e}")))?;
                Ok(Condition::NamePattern(regex))
            }
            _ => Err(DbError::Unavailable(format!(
                "unsupported filter on `{field}`: {value}"
            ))),
        }
    }

    fn matches(&self, document: &PlanetDocument) -> bool {
        match self {
            Condition::Id(oid) => document.id.as_ref() == Some(oid),
            Condition::NameEquals(name) => &document.name == name,
            Condition::NamePattern(regex) => regex.is_match(&document.name),
        }
    }
}

#[async_trait]
impl PlanetCollection for MemoryCollection {
    async fn find(&self, filter: Document) -> Result<Vec<PlanetDocument>, DbError> {
        let matcher = Matcher::compile(&filter)?;
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|doc| matcher.matches(doc))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<PlanetDocument>, DbError> {
        let matcher = Matcher::compile(&filter)?;
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|doc| matcher.matches(doc)).cloned())
    }

    async fn insert_one(&self, mut document: PlanetDocument) -> Result<ObjectId, DbError> {
        let oid = *document.id.get_or_insert_with(ObjectId::new);
        let mut documents = self.documents.write().await;
        if documents.iter().any(|doc| doc.id == Some(oid)) {
            return Err(DbError::Unavailable(format!("duplicate _id {oid}")));
        }
        documents.push(document);
        Ok(oid)
    }

    async fn delete_one(&self, filter: Document) -> Result<u64, DbError> {
        let matcher = Matcher::compile(&filter)?;
        let mut documents = self.documents.write().await;
        match documents.iter().position(|doc| matcher.matches(doc)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn planet(name: &str) -> PlanetDocument {
        PlanetDocument {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn assigns_ids_and_keeps_insertion_order() {
        let store = MemoryCollection::new();
        let first = store.insert_one(planet("Alderaan")).await.unwrap();
        let second = store.insert_one(planet("Hoth")).await.unwrap();
        assert_ne!(first, second);

        let all = store.find(doc! {}).await.unwrap();
        let names: Vec<_> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Alderaan", "Hoth"]);
        assert_eq!(all[0].id, Some(first));
    }

    #[tokio::test]
    async fn regex_filter_honours_case_option() {
        let store = MemoryCollection::new();
        store.insert_one(planet("Naboo")).await.unwrap();

        let insensitive = store
            .find(doc! { "name": { "$regex": "nab", "$options": "i" } })
            .await
            .unwrap();
        assert_eq!(insensitive.len(), 1);

        let sensitive = store.find(doc! { "name": { "$regex": "nab" } }).await.unwrap();
        assert!(sensitive.is_empty());
    }

    #[tokio::test]
    async fn delete_one_removes_a_single_match() {
        let store = MemoryCollection::new();
        let oid = store.insert_one(planet("Kamino")).await.unwrap();

        assert_eq!(store.delete_one(doc! { "_id": oid }).await.unwrap(), 1);
        assert_eq!(store.delete_one(doc! { "_id": oid }).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_filter_field_is_rejected() {
        let store = MemoryCollection::new();
        let result = store.find(doc! { "terrain": "ocean" }).await;
        assert!(matches!(result, Err(DbError::Unavailable(_))));
    }
}
