use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::{Collection, Document, DocumentStore};

#[derive(Clone)]
pub struct PgDocumentStore {
    db: PgPool,
}

impl PgDocumentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    key: String,
    owner_id: Option<Uuid>,
    is_public: bool,
    body: Json<serde_json::Value>,
}

impl From<DocumentRow> for Document {
    fn from(r: DocumentRow) -> Self {
        Self {
            key: r.key,
            owner_id: r.owner_id,
            is_public: r.is_public,
            body: r.body.0,
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, collection: Collection, key: &str) -> anyhow::Result<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT key, owner_id, is_public, body
              FROM documents
             WHERE collection = $1 AND key = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(key)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("get {}/{}", collection.as_str(), key))?;

        Ok(row.map(Document::from))
    }

    async fn put(&self, collection: Collection, doc: Document) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, owner_id, is_public, body)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (collection, key) DO UPDATE
               SET owner_id = EXCLUDED.owner_id,
                   is_public = EXCLUDED.is_public,
                   body = EXCLUDED.body,
                   updated_at = now()
            "#,
        )
        .bind(collection.as_str())
        .bind(&doc.key)
        .bind(doc.owner_id) // Option<Uuid> → NULL allowed
        .bind(doc.is_public)
        .bind(Json(&doc.body))
        .execute(&self.db)
        .await
        .with_context(|| format!("put {}/{}", collection.as_str(), doc.key))?;

        Ok(())
    }

    async fn delete(&self, collection: Collection, key: &str) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM documents
             WHERE collection = $1 AND key = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(key)
        .execute(&self.db)
        .await
        .with_context(|| format!("delete {}/{}", collection.as_str(), key))?;

        Ok(res.rows_affected() > 0)
    }

    async fn list_visible(
        &self,
        collection: Collection,
        viewer: Uuid,
    ) -> anyhow::Result<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT key, owner_id, is_public, body
              FROM documents
             WHERE collection = $1
               AND (owner_id = $2 OR is_public)
             ORDER BY key ASC
            "#,
        )
        .bind(collection.as_str())
        .bind(viewer)
        .fetch_all(&self.db)
        .await
        .with_context(|| format!("list {}", collection.as_str()))?;

        Ok(rows.into_iter().map(Document::from).collect())
    }
}
