use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        ChecklistRepository, DepartmentRepository, HistoryRepository, NotificationRepository,
        ProcessRepository,
    },
    models::{
        auth::User,
        checklist::ChecklistItem,
        history::HistoryEventType,
        process::ProcessStatus,
    },
    services::process_service::{ensure_in_flow, notification_recipient},
};

/// O portão sequencial: o item só conclui com o anterior concluído.
/// `None` significa que não há item anterior (primeira etapa).
pub fn complete_gate(previous_completed: Option<bool>) -> Result<(), AppError> {
    match previous_completed {
        Some(false) => Err(AppError::ChecklistOrder),
        _ => Ok(()),
    }
}

/// O espelho do portão: só o item concluído mais alto reabre. `None`
/// significa que não há item seguinte (última etapa).
pub fn uncomplete_gate(next_completed: Option<bool>) -> Result<(), AppError> {
    match next_completed {
        Some(true) => Err(AppError::ChecklistOrder),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct ChecklistService {
    checklist_repo: ChecklistRepository,
    process_repo: ProcessRepository,
    history_repo: HistoryRepository,
    department_repo: DepartmentRepository,
    notification_repo: NotificationRepository,
    pool: PgPool,
}

impl ChecklistService {
    pub fn new(
        checklist_repo: ChecklistRepository,
        process_repo: ProcessRepository,
        history_repo: HistoryRepository,
        department_repo: DepartmentRepository,
        notification_repo: NotificationRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            checklist_repo,
            process_repo,
            history_repo,
            department_repo,
            notification_repo,
            pool,
        }
    }

    pub async fn list(&self, process_id: Uuid) -> Result<Vec<ChecklistItem>, AppError> {
        self.process_repo
            .find_by_id(&self.pool, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        self.checklist_repo.list_by_process(process_id).await
    }

    /// Conclui o item do departamento. Na última etapa do fluxo, a
    /// conclusão finaliza o processo.
    pub async fn complete(
        &self,
        process_id: Uuid,
        department_id: Uuid,
        user: &User,
    ) -> Result<ChecklistItem, AppError> {
        let mut tx = self.pool.begin().await?;

        let process = self
            .process_repo
            .find_by_id(&mut *tx, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        if process.status == ProcessStatus::Finished {
            return Err(AppError::WorkflowViolation("O processo já foi finalizado."));
        }

        let flow = &process.flow_departments;
        let index = ensure_in_flow(flow, department_id)?;

        let previous_completed = if index > 0 {
            let previous = self
                .checklist_repo
                .find_item(&mut *tx, process_id, flow[index - 1])
                .await?
                .ok_or(AppError::NotFound("Item de checklist"))?;
            Some(previous.completed)
        } else {
            None
        };
        complete_gate(previous_completed)?;

        let current = self
            .checklist_repo
            .find_item(&mut *tx, process_id, department_id)
            .await?
            .ok_or(AppError::NotFound("Item de checklist"))?;

        // Concluir duas vezes é um no-op.
        if current.completed {
            return Ok(current);
        }

        let item = self
            .checklist_repo
            .set_completed(&mut *tx, process_id, department_id, true, Some(user.id))
            .await?;

        let label = self
            .department_repo
            .label_for(&mut *tx, department_id)
            .await?;

        self.history_repo
            .append(
                &mut *tx,
                process_id,
                HistoryEventType::Checklist,
                "Checklist da etapa concluído",
                Some(user.id),
                label.as_deref(),
            )
            .await?;

        // Última etapa concluída dispara a finalização do processo.
        if index + 1 == flow.len() {
            self.process_repo
                .update_stage(
                    &mut *tx,
                    process_id,
                    index as i32,
                    100.0,
                    ProcessStatus::Finished,
                )
                .await?;

            self.history_repo
                .append(
                    &mut *tx,
                    process_id,
                    HistoryEventType::Finalized,
                    "Processo finalizado",
                    Some(user.id),
                    label.as_deref(),
                )
                .await?;

            if let Some(recipient) = notification_recipient(process.created_by, user.id) {
                self.notification_repo
                    .create(
                        &mut *tx,
                        recipient,
                        "process_finished",
                        "Processo finalizado.",
                        Some(process_id),
                    )
                    .await?;
            }

            tracing::info!("Processo {} finalizado pelo checklist", process_id);
        }

        tx.commit().await?;

        Ok(item)
    }

    /// Reabre um item. Só o item concluído mais alto pode ser reaberto,
    /// para manter o invariante sequencial.
    pub async fn uncomplete(
        &self,
        process_id: Uuid,
        department_id: Uuid,
        user: &User,
    ) -> Result<ChecklistItem, AppError> {
        let mut tx = self.pool.begin().await?;

        let process = self
            .process_repo
            .find_by_id(&mut *tx, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        if process.status == ProcessStatus::Finished {
            return Err(AppError::WorkflowViolation(
                "Reabra o processo antes de alterar o checklist.",
            ));
        }

        let flow = &process.flow_departments;
        let index = ensure_in_flow(flow, department_id)?;

        // Se a etapa seguinte já concluiu, este item não é o mais alto.
        let next_completed = if index + 1 < flow.len() {
            let next = self
                .checklist_repo
                .find_item(&mut *tx, process_id, flow[index + 1])
                .await?
                .ok_or(AppError::NotFound("Item de checklist"))?;
            Some(next.completed)
        } else {
            None
        };
        uncomplete_gate(next_completed)?;

        let item = self
            .checklist_repo
            .set_completed(&mut *tx, process_id, department_id, false, None)
            .await?;

        let label = self
            .department_repo
            .label_for(&mut *tx, department_id)
            .await?;

        self.history_repo
            .append(
                &mut *tx,
                process_id,
                HistoryEventType::Checklist,
                "Checklist da etapa reaberto",
                Some(user.id),
                label.as_deref(),
            )
            .await?;

        tx.commit().await?;

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primeiro_item_conclui_sem_anterior() {
        assert!(complete_gate(None).is_ok());
    }

    #[test]
    fn item_com_anterior_pendente_nao_conclui() {
        assert!(matches!(
            complete_gate(Some(false)),
            Err(AppError::ChecklistOrder)
        ));
    }

    #[test]
    fn item_com_anterior_concluido_conclui() {
        assert!(complete_gate(Some(true)).is_ok());
    }

    #[test]
    fn ultimo_item_reabre_sem_proximo() {
        assert!(uncomplete_gate(None).is_ok());
    }

    #[test]
    fn item_com_proximo_concluido_nao_reabre() {
        assert!(matches!(
            uncomplete_gate(Some(true)),
            Err(AppError::ChecklistOrder)
        ));
    }

    #[test]
    fn item_mais_alto_concluido_reabre() {
        assert!(uncomplete_gate(Some(false)).is_ok());
    }
}
