//! Persistence boundary: collections of JSON documents.
//!
//! Everything above this module works with typed records; [`decode`] is the
//! single place where stored JSON becomes one.

#[cfg(test)]
mod memory;
mod pg;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[cfg(test)]
pub use memory::MemoryDocumentStore;
pub use pg::PgDocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Foods,
    Dishes,
    DailyMeals,
    Profiles,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Foods => "foods",
            Collection::Dishes => "dishes",
            Collection::DailyMeals => "daily-meals",
            Collection::Profiles => "profiles",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub key: String,
    /// `None` for shared catalog entries nobody owns.
    pub owner_id: Option<Uuid>,
    pub is_public: bool,
    pub body: serde_json::Value,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: Collection, key: &str) -> anyhow::Result<Option<Document>>;

    /// Inserts or fully replaces the document under `doc.key`.
    async fn put(&self, collection: Collection, doc: Document) -> anyhow::Result<()>;

    /// Returns whether a document was removed.
    async fn delete(&self, collection: Collection, key: &str) -> anyhow::Result<bool>;

    /// Documents owned by `viewer` plus every public document.
    async fn list_visible(
        &self,
        collection: Collection,
        viewer: Uuid,
    ) -> anyhow::Result<Vec<Document>>;
}

pub fn decode<T: DeserializeOwned>(collection: Collection, doc: &Document) -> Result<T, AppError> {
    serde_json::from_value(doc.body.clone()).map_err(|e| AppError::Decode {
        collection: collection.as_str(),
        key: doc.key.clone(),
        reason: e.to_string(),
    })
}

pub fn encode<T: Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Persistence(e.into()))
}

/// `{userId}_{date}`
pub fn daily_meals_key(user_id: Uuid, date_key: &str) -> String {
    format!("{user_id}_{date_key}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
        #[serde(default)]
        count: u32,
    }

    fn doc(body: serde_json::Value) -> Document {
        Document {
            key: "k1".into(),
            owner_id: None,
            is_public: false,
            body,
        }
    }

    #[test]
    fn decode_fills_defaults() {
        let s: Sample = decode(Collection::Foods, &doc(json!({ "name": "rice" }))).unwrap();
        assert_eq!(s.name, "rice");
        assert_eq!(s.count, 0);
    }

    #[test]
    fn decode_reports_collection_and_key() {
        let err = decode::<Sample>(Collection::Dishes, &doc(json!({ "count": 2 }))).unwrap_err();
        match err {
            AppError::Decode {
                collection, key, ..
            } => {
                assert_eq!(collection, "dishes");
                assert_eq!(key, "k1");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn daily_meals_key_format() {
        let id = Uuid::nil();
        assert_eq!(
            daily_meals_key(id, "2024-01-31"),
            "00000000-0000-0000-0000-000000000000_2024-01-31"
        );
        assert_eq!(Collection::DailyMeals.as_str(), "daily-meals");
    }
}
