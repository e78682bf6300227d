//! Asset document repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        document::{CreateDocument, Document},
        id,
    },
};

#[derive(Clone)]
pub struct DocumentsRepository {
    pool: Pool<Postgres>,
}

impl DocumentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Documents attached to one asset
    pub async fn list_for_asset(&self, asset_id: &str) -> AppResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE asset_id = $1 ORDER BY created_at DESC",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a document by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Document> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))
    }

    /// Attach a document to an asset
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        let asset_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM assets WHERE id = $1)")
                .bind(&data.asset_id)
                .fetch_one(&self.pool)
                .await?;
        if !asset_exists {
            return Err(AppError::NotFound(format!(
                "Asset {} not found",
                data.asset_id
            )));
        }

        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (id, asset_id, title, document_type, file_url, uploaded_by, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id::new_id(id::DOCUMENT_PREFIX))
        .bind(&data.asset_id)
        .bind(&data.title)
        .bind(&data.document_type)
        .bind(&data.file_url)
        .bind(&data.uploaded_by)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(document)
    }

    /// Delete a document
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Document {} not found", id)));
        }
        Ok(())
    }
}
