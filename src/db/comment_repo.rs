use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::comment::Comment};

#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
        department_id: Uuid,
        author_id: Uuid,
        parent_id: Option<Uuid>,
        body: &str,
        mentions: &[Uuid],
    ) -> Result<Comment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (process_id, department_id, author_id, parent_id, body, mentions)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(process_id)
        .bind(department_id)
        .bind(author_id)
        .bind(parent_id)
        .bind(body)
        .bind(mentions)
        .fetch_one(executor)
        .await?;

        Ok(comment)
    }

    pub async fn list_by_process(&self, process_id: Uuid) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE process_id = $1 ORDER BY created_at ASC",
        )
        .bind(process_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Comment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(comment)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Reinsere um comentário restaurado da lixeira.
    pub async fn insert_restored<'e, E>(
        &self,
        executor: E,
        comment: &Comment,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO comments (id, process_id, department_id, author_id, parent_id, body, mentions, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(comment.id)
        .bind(comment.process_id)
        .bind(comment.department_id)
        .bind(comment.author_id)
        .bind(comment.parent_id)
        .bind(&comment.body)
        .bind(&comment.mentions)
        .bind(comment.created_at)
        .execute(executor)
        .await?;

        Ok(())
    }
}
