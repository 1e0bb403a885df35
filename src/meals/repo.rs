use uuid::Uuid;

use super::model::DailyMeals;
use crate::{
    error::AppError,
    store::{daily_meals_key, decode, encode, Collection, Document, DocumentStore},
};

pub async fn find(
    store: &dyn DocumentStore,
    user_id: Uuid,
    date_key: &str,
) -> Result<Option<DailyMeals>, AppError> {
    let key = daily_meals_key(user_id, date_key);
    match store.get(Collection::DailyMeals, &key).await? {
        Some(doc) => Ok(Some(decode(Collection::DailyMeals, &doc)?)),
        None => Ok(None),
    }
}

pub async fn save(store: &dyn DocumentStore, day: &DailyMeals) -> Result<(), AppError> {
    let doc = Document {
        key: daily_meals_key(day.user_id, &day.date),
        owner_id: Some(day.user_id),
        is_public: false,
        body: encode(day)?,
    };
    store.put(Collection::DailyMeals, doc).await?;
    Ok(())
}
