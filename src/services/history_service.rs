use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{HistoryRepository, ProcessRepository},
    models::{auth::User, history::HistoryEvent},
};

// O histórico é append-only: este serviço só lista e, para admins, apaga.
// Quem escreve eventos são os serviços de fluxo, cada um na sua transação.
#[derive(Clone)]
pub struct HistoryService {
    history_repo: HistoryRepository,
    process_repo: ProcessRepository,
    pool: PgPool,
}

impl HistoryService {
    pub fn new(
        history_repo: HistoryRepository,
        process_repo: ProcessRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            history_repo,
            process_repo,
            pool,
        }
    }

    pub async fn list(&self, process_id: Uuid) -> Result<Vec<HistoryEvent>, AppError> {
        self.process_repo
            .find_by_id(&self.pool, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        self.history_repo.list_by_process(process_id).await
    }

    pub async fn delete(&self, event_id: Uuid, user: &User) -> Result<(), AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden);
        }

        let deleted = self.history_repo.delete(&self.pool, event_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Evento de histórico"));
        }

        tracing::warn!("Evento de histórico {} removido por {}", event_id, user.email);

        Ok(())
    }
}
