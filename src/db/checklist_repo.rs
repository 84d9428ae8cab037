use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::checklist::ChecklistItem};

#[derive(Clone)]
pub struct ChecklistRepository {
    pool: PgPool,
}

impl ChecklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria um item pendente para cada departamento do fluxo, de uma vez só.
    pub async fn create_for_flow<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
        flow_departments: &[Uuid],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO checklist_items (process_id, department_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
        )
        .bind(process_id)
        .bind(flow_departments)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Itens na ordem do fluxo do processo (não na ordem de inserção).
    pub async fn list_by_process(&self, process_id: Uuid) -> Result<Vec<ChecklistItem>, AppError> {
        let items = sqlx::query_as::<_, ChecklistItem>(
            r#"
            SELECT ci.*
            FROM checklist_items ci
            INNER JOIN processes p ON p.id = ci.process_id
            WHERE ci.process_id = $1
            ORDER BY array_position(p.flow_departments, ci.department_id) ASC
            "#,
        )
        .bind(process_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn find_item<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
        department_id: Uuid,
    ) -> Result<Option<ChecklistItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, ChecklistItem>(
            "SELECT * FROM checklist_items WHERE process_id = $1 AND department_id = $2",
        )
        .bind(process_id)
        .bind(department_id)
        .fetch_optional(executor)
        .await?;

        Ok(item)
    }

    pub async fn set_completed<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
        department_id: Uuid,
        completed: bool,
        completed_by: Option<Uuid>,
    ) -> Result<ChecklistItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ChecklistItem>(
            r#"
            UPDATE checklist_items
            SET completed    = $3,
                completed_by = $4,
                completed_at = CASE WHEN $3 THEN NOW() ELSE NULL END
            WHERE process_id = $1 AND department_id = $2
            RETURNING *
            "#,
        )
        .bind(process_id)
        .bind(department_id)
        .bind(completed)
        .bind(completed_by)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Item de checklist"))
    }

    /// Reinsere um item restaurado da lixeira, preservando o estado original.
    pub async fn insert_restored<'e, E>(
        &self,
        executor: E,
        item: &ChecklistItem,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO checklist_items (id, process_id, department_id, completed, completed_by, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.id)
        .bind(item.process_id)
        .bind(item.department_id)
        .bind(item.completed)
        .bind(item.completed_by)
        .bind(item.completed_at)
        .execute(executor)
        .await?;

        Ok(())
    }
}
