use tracing::warn;
use uuid::Uuid;

use super::model::Food;
use crate::{
    error::AppError,
    store::{decode, encode, Collection, Document, DocumentStore},
};

fn from_document(doc: &Document) -> Result<Food, AppError> {
    let food = decode::<Food>(Collection::Foods, doc)?.normalized();
    food.validate().map_err(|e| AppError::Decode {
        collection: Collection::Foods.as_str(),
        key: doc.key.clone(),
        reason: e.to_string(),
    })?;
    Ok(food)
}

pub async fn find(store: &dyn DocumentStore, id: Uuid) -> Result<Option<Food>, AppError> {
    match store.get(Collection::Foods, &id.to_string()).await? {
        Some(doc) => Ok(Some(from_document(&doc)?)),
        None => Ok(None),
    }
}

/// Undecodable documents are logged and left out of listings.
pub async fn list_visible(store: &dyn DocumentStore, viewer: Uuid) -> Result<Vec<Food>, AppError> {
    let docs = store.list_visible(Collection::Foods, viewer).await?;
    Ok(docs
        .iter()
        .filter_map(|doc| match from_document(doc) {
            Ok(food) => Some(food),
            Err(e) => {
                warn!(error = %e, "skipping food document");
                None
            }
        })
        .collect())
}

pub async fn save(store: &dyn DocumentStore, food: &Food) -> Result<(), AppError> {
    let doc = Document {
        key: food.id.to_string(),
        owner_id: food.user_id,
        is_public: food.is_public,
        body: encode(food)?,
    };
    store.put(Collection::Foods, doc).await?;
    Ok(())
}

pub async fn remove(store: &dyn DocumentStore, id: Uuid) -> Result<bool, AppError> {
    Ok(store.delete(Collection::Foods, &id.to_string()).await?)
}
