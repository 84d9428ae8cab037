use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::notification::Notification};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        kind: &str,
        message: &str,
        process_id: Option<Uuid>,
    ) -> Result<Notification, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, kind, message, process_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(message)
        .bind(process_id)
        .fetch_one(executor)
        .await?;

        Ok(notification)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Marca como lida. O filtro por user_id impede marcar notificação alheia.
    pub async fn mark_read<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Notification, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications SET read = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Notificação"))
    }

    pub async fn mark_all_read<'e, E>(&self, executor: E, user_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1 AND NOT read")
                .bind(user_id)
                .execute(executor)
                .await?;

        Ok(result.rows_affected())
    }
}
