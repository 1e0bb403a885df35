use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Collection, Document, DocumentStore};

/// In-process store behind `AppState::fake`.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<BTreeMap<(Collection, String), Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: Collection, key: &str) -> anyhow::Result<Option<Document>> {
        let docs = self.docs.read().await;
        Ok(docs.get(&(collection, key.to_string())).cloned())
    }

    async fn put(&self, collection: Collection, doc: Document) -> anyhow::Result<()> {
        let mut docs = self.docs.write().await;
        docs.insert((collection, doc.key.clone()), doc);
        Ok(())
    }

    async fn delete(&self, collection: Collection, key: &str) -> anyhow::Result<bool> {
        let mut docs = self.docs.write().await;
        Ok(docs.remove(&(collection, key.to_string())).is_some())
    }

    async fn list_visible(
        &self,
        collection: Collection,
        viewer: Uuid,
    ) -> anyhow::Result<Vec<Document>> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .filter(|((c, _), d)| *c == collection && (d.owner_id == Some(viewer) || d.is_public))
            .map(|(_, d)| d.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(key: &str, owner: Option<Uuid>, public: bool) -> Document {
        Document {
            key: key.into(),
            owner_id: owner,
            is_public: public,
            body: json!({ "key": key }),
        }
    }

    #[tokio::test]
    async fn put_replaces_and_delete_reports() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        store
            .put(Collection::Foods, doc("a", Some(me), false))
            .await
            .unwrap();
        let mut replaced = doc("a", Some(me), true);
        replaced.body = json!({ "v": 2 });
        store.put(Collection::Foods, replaced.clone()).await.unwrap();

        let got = store.get(Collection::Foods, "a").await.unwrap();
        assert_eq!(got, Some(replaced));
        assert!(store.get(Collection::Dishes, "a").await.unwrap().is_none());

        assert!(store.delete(Collection::Foods, "a").await.unwrap());
        assert!(!store.delete(Collection::Foods, "a").await.unwrap());
    }

    #[tokio::test]
    async fn list_visible_returns_own_and_public() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.put(Collection::Foods, doc("mine", Some(me), false)).await.unwrap();
        store.put(Collection::Foods, doc("theirs", Some(other), false)).await.unwrap();
        store.put(Collection::Foods, doc("shared", Some(other), true)).await.unwrap();
        store.put(Collection::Foods, doc("catalog", None, true)).await.unwrap();
        store.put(Collection::Dishes, doc("dish", Some(me), false)).await.unwrap();

        let keys: Vec<_> = store
            .list_visible(Collection::Foods, me)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.key)
            .collect();
        assert_eq!(keys, vec!["catalog", "mine", "shared"]);
    }
}
