use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::NotificationRepository,
    models::notification::Notification,
};

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    pool: PgPool,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<Notification, AppError> {
        self.repo.mark_read(&self.pool, id, user_id).await
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        self.repo.mark_all_read(&self.pool, user_id).await
    }
}
