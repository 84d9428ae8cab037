use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::UserRole,
        document::{Document, DocumentVisibility},
    },
};

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
        file_name: &str,
        file_url: &str,
        content_type: &str,
        size_bytes: i64,
        visibility: DocumentVisibility,
        allowed_roles: &[UserRole],
        allowed_users: &[Uuid],
        uploaded_by: Uuid,
    ) -> Result<Document, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (
                process_id, file_name, file_url, content_type, size_bytes,
                visibility, allowed_roles, allowed_users, uploaded_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(process_id)
        .bind(file_name)
        .bind(file_url)
        .bind(content_type)
        .bind(size_bytes)
        .bind(visibility)
        .bind(allowed_roles)
        .bind(allowed_users)
        .bind(uploaded_by)
        .fetch_one(executor)
        .await?;

        Ok(document)
    }

    pub async fn list_by_process(&self, process_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE process_id = $1 ORDER BY created_at DESC",
        )
        .bind(process_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Document>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(document)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Reinsere um documento restaurado da lixeira.
    pub async fn insert_restored<'e, E>(
        &self,
        executor: E,
        document: &Document,
    ) -> Result<Document, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let restored = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (
                id, process_id, file_name, file_url, content_type, size_bytes,
                visibility, allowed_roles, allowed_users, uploaded_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(document.id)
        .bind(document.process_id)
        .bind(&document.file_name)
        .bind(&document.file_url)
        .bind(&document.content_type)
        .bind(document.size_bytes)
        .bind(document.visibility)
        .bind(&document.allowed_roles)
        .bind(&document.allowed_users)
        .bind(document.uploaded_by)
        .bind(document.created_at)
        .fetch_one(executor)
        .await?;

        Ok(restored)
    }
}
