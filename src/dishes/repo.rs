use tracing::warn;
use uuid::Uuid;

use super::model::Dish;
use crate::{
    error::AppError,
    store::{decode, encode, Collection, Document, DocumentStore},
};

pub async fn find(store: &dyn DocumentStore, id: Uuid) -> Result<Option<Dish>, AppError> {
    match store.get(Collection::Dishes, &id.to_string()).await? {
        Some(doc) => Ok(Some(decode(Collection::Dishes, &doc)?)),
        None => Ok(None),
    }
}

pub async fn list_visible(store: &dyn DocumentStore, viewer: Uuid) -> Result<Vec<Dish>, AppError> {
    let docs = store.list_visible(Collection::Dishes, viewer).await?;
    Ok(docs
        .iter()
        .filter_map(|doc| match decode::<Dish>(Collection::Dishes, doc) {
            Ok(dish) => Some(dish),
            Err(e) => {
                warn!(error = %e, "skipping dish document");
                None
            }
        })
        .collect())
}

pub async fn save(store: &dyn DocumentStore, dish: &Dish) -> Result<(), AppError> {
    let doc = Document {
        key: dish.id.to_string(),
        owner_id: Some(dish.user_id),
        is_public: dish.is_public,
        body: encode(dish)?,
    };
    store.put(Collection::Dishes, doc).await?;
    Ok(())
}

pub async fn remove(store: &dyn DocumentStore, id: Uuid) -> Result<bool, AppError> {
    Ok(store.delete(Collection::Dishes, &id.to_string()).await?)
}
