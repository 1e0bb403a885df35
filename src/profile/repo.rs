use uuid::Uuid;

use super::model::Profile;
use crate::{
    error::AppError,
    store::{decode, encode, Collection, Document, DocumentStore},
};

pub async fn find(store: &dyn DocumentStore, user_id: Uuid) -> Result<Option<Profile>, AppError> {
    match store.get(Collection::Profiles, &user_id.to_string()).await? {
        Some(doc) => Ok(Some(decode(Collection::Profiles, &doc)?)),
        None => Ok(None),
    }
}

pub async fn save(store: &dyn DocumentStore, profile: &Profile) -> Result<(), AppError> {
    let doc = Document {
        key: profile.user_id.to_string(),
        owner_id: Some(profile.user_id),
        is_public: false,
        body: encode(profile)?,
    };
    store.put(Collection::Profiles, doc).await?;
    Ok(())
}
