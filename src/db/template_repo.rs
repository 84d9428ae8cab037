use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::template::Template};

#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        department_ids: &[Uuid],
        created_by: Uuid,
    ) -> Result<Template, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Template>(
            r#"
            INSERT INTO templates (name, department_ids, created_by)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(department_ids)
        .bind(created_by)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            AppError::from_unique_violation(
                e,
                AppError::UniqueConstraintViolation(format!("O template '{}' já existe.", name)),
            )
        })
    }

    pub async fn list(&self) -> Result<Vec<Template>, AppError> {
        let templates =
            sqlx::query_as::<_, Template>("SELECT * FROM templates ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(templates)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Template>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let template = sqlx::query_as::<_, Template>("SELECT * FROM templates WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(template)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
