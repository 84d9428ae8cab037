use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::history::{HistoryEvent, HistoryEventType},
};

// Auditoria: só INSERT e (para admins) DELETE. UPDATE não existe aqui.
#[derive(Clone)]
pub struct HistoryRepository {
    pool: PgPool,
}

impl HistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn append<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
        event_type: HistoryEventType,
        action: &str,
        actor_id: Option<Uuid>,
        department_label: Option<&str>,
    ) -> Result<HistoryEvent, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let event = sqlx::query_as::<_, HistoryEvent>(
            r#"
            INSERT INTO history_events (process_id, event_type, action, actor_id, department_label)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(process_id)
        .bind(event_type)
        .bind(action)
        .bind(actor_id)
        .bind(department_label)
        .fetch_one(executor)
        .await?;

        Ok(event)
    }

    pub async fn list_by_process(&self, process_id: Uuid) -> Result<Vec<HistoryEvent>, AppError> {
        let events = sqlx::query_as::<_, HistoryEvent>(
            "SELECT * FROM history_events WHERE process_id = $1 ORDER BY created_at DESC",
        )
        .bind(process_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM history_events WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Reinsere um evento restaurado da lixeira, com id e data originais.
    pub async fn insert_restored<'e, E>(
        &self,
        executor: E,
        event: &HistoryEvent,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO history_events (id, process_id, event_type, action, actor_id, department_label, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.id)
        .bind(event.process_id)
        .bind(event.event_type)
        .bind(&event.action)
        .bind(event.actor_id)
        .bind(&event.department_label)
        .bind(event.created_at)
        .execute(executor)
        .await?;

        Ok(())
    }
}
