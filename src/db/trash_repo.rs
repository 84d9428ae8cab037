use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::trash::{TrashEntity, TrashItem},
};

#[derive(Clone)]
pub struct TrashRepository {
    pool: PgPool,
}

impl TrashRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        entity_type: TrashEntity,
        entity_id: Uuid,
        payload: &Value,
        deleted_by: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<TrashItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, TrashItem>(
            r#"
            INSERT INTO trash_items (entity_type, entity_id, payload, deleted_by, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .bind(payload)
        .bind(deleted_by)
        .bind(expires_at)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    /// Itens visíveis: não expirados e, para não-admins, só os próprios.
    /// Itens expirados somem daqui mesmo antes do purge rodar.
    pub async fn list_visible(
        &self,
        user_id: Uuid,
        include_all: bool,
    ) -> Result<Vec<TrashItem>, AppError> {
        let items = sqlx::query_as::<_, TrashItem>(
            r#"
            SELECT * FROM trash_items
            WHERE expires_at > NOW()
              AND (deleted_by = $1 OR $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(include_all)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<TrashItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, TrashItem>("SELECT * FROM trash_items WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(item)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM trash_items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Passo de limpeza: apaga de vez tudo que já expirou.
    pub async fn purge_expired<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM trash_items WHERE expires_at <= NOW()")
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
