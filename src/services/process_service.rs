use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        ChecklistRepository, CompanyRepository, DepartmentRepository, HistoryRepository,
        NotificationRepository, ProcessRepository, TemplateRepository,
    },
    models::{
        auth::User,
        history::HistoryEventType,
        process::{Process, ProcessStatus, ProcessWithCompany, Tag},
    },
};

/// Posição de um departamento dentro do fluxo congelado do processo.
pub fn stage_index(flow: &[Uuid], department_id: Uuid) -> Option<usize> {
    flow.iter().position(|d| *d == department_id)
}

/// Como `stage_index`, mas departamento fora do fluxo vira erro de workflow.
pub fn ensure_in_flow(flow: &[Uuid], department_id: Uuid) -> Result<usize, AppError> {
    stage_index(flow, department_id).ok_or(AppError::WorkflowViolation(
        "O departamento não pertence ao fluxo deste processo.",
    ))
}

/// Quem recebe a notificação de um evento do processo: o criador, exceto
/// quando ele mesmo é o autor da ação.
pub fn notification_recipient(created_by: Option<Uuid>, actor_id: Uuid) -> Option<Uuid> {
    created_by.filter(|creator| *creator != actor_id)
}

/// Percentual de etapas vencidas. `current_index` etapas concluídas de `total`.
pub fn progress_for(current_index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (current_index as f64 / total as f64) * 100.0
}

#[derive(Clone)]
pub struct ProcessService {
    process_repo: ProcessRepository,
    checklist_repo: ChecklistRepository,
    history_repo: HistoryRepository,
    department_repo: DepartmentRepository,
    template_repo: TemplateRepository,
    company_repo: CompanyRepository,
    notification_repo: NotificationRepository,
    pool: PgPool,
}

impl ProcessService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        process_repo: ProcessRepository,
        checklist_repo: ChecklistRepository,
        history_repo: HistoryRepository,
        department_repo: DepartmentRepository,
        template_repo: TemplateRepository,
        company_repo: CompanyRepository,
        notification_repo: NotificationRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            process_repo,
            checklist_repo,
            history_repo,
            department_repo,
            template_repo,
            company_repo,
            notification_repo,
            pool,
        }
    }

    // =========================================================================
    //  CRIAÇÃO
    // =========================================================================

    /// Resolve o fluxo: lista explícita ou template. Valida existência,
    /// atividade e ausência de repetição dos departamentos.
    async fn resolve_flow(
        &self,
        flow_departments: Option<Vec<Uuid>>,
        template_id: Option<Uuid>,
    ) -> Result<Vec<Uuid>, AppError> {
        let flow = match (flow_departments, template_id) {
            (Some(flow), _) if !flow.is_empty() => flow,
            (_, Some(template_id)) => {
                let template = self
                    .template_repo
                    .find_by_id(&self.pool, template_id)
                    .await?
                    .ok_or(AppError::NotFound("Template"))?;
                template.department_ids
            }
            _ => {
                return Err(AppError::WorkflowViolation(
                    "O processo precisa de um fluxo de departamentos ou de um template.",
                ))
            }
        };

        let mut seen = flow.clone();
        seen.sort();
        seen.dedup();
        if seen.len() != flow.len() {
            return Err(AppError::WorkflowViolation(
                "O fluxo não pode repetir departamentos.",
            ));
        }

        let active = self.department_repo.count_active(&self.pool, &flow).await?;
        if active as usize != flow.len() {
            return Err(AppError::WorkflowViolation(
                "O fluxo contém departamentos inexistentes ou desativados.",
            ));
        }

        Ok(flow)
    }

    pub async fn create_process(
        &self,
        company_id: Uuid,
        flow_departments: Option<Vec<Uuid>>,
        template_id: Option<Uuid>,
        user: &User,
    ) -> Result<Process, AppError> {
        let flow = self.resolve_flow(flow_departments, template_id).await?;

        self.company_repo
            .find_by_id(&self.pool, company_id)
            .await?
            .ok_or(AppError::NotFound("Empresa"))?;

        let mut tx = self.pool.begin().await?;

        let process = self
            .process_repo
            .create(&mut *tx, company_id, &flow, None, user.id)
            .await?;

        self.checklist_repo
            .create_for_flow(&mut *tx, process.id, &flow)
            .await?;

        let first_label = self.department_repo.label_for(&mut *tx, flow[0]).await?;
        self.history_repo
            .append(
                &mut *tx,
                process.id,
                HistoryEventType::Created,
                "Processo criado",
                Some(user.id),
                first_label.as_deref(),
            )
            .await?;

        tx.commit().await?;

        tracing::info!("Processo {} criado para a empresa {}", process.id, company_id);

        Ok(process)
    }

    // =========================================================================
    //  CONSULTA
    // =========================================================================

    pub async fn list_processes(&self) -> Result<Vec<ProcessWithCompany>, AppError> {
        self.process_repo.list_with_company().await
    }

    pub async fn get_process(&self, id: Uuid) -> Result<ProcessWithCompany, AppError> {
        self.process_repo
            .find_with_company(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Processo"))
    }

    // =========================================================================
    //  TRANSIÇÕES (avançar / retornar / finalizar)
    // =========================================================================

    /// Avança o processo para a próxima etapa do fluxo. Exige o checklist
    /// da etapa atual concluído; na última etapa, finaliza.
    pub async fn advance(&self, id: Uuid, user: &User) -> Result<Process, AppError> {
        let mut tx = self.pool.begin().await?;

        let process = self
            .process_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        if process.status == ProcessStatus::Finished {
            return Err(AppError::WorkflowViolation("O processo já foi finalizado."));
        }

        let total = process.flow_departments.len();
        let index = process.current_index as usize;
        let current_dept = process.flow_departments[index];

        let item = self
            .checklist_repo
            .find_item(&mut *tx, id, current_dept)
            .await?
            .ok_or(AppError::NotFound("Item de checklist"))?;

        if !item.completed {
            return Err(AppError::WorkflowViolation(
                "Conclua o checklist da etapa atual antes de avançar.",
            ));
        }

        let updated = if index + 1 >= total {
            // Última etapa vencida: o avanço vira finalização.
            let finished = self
                .process_repo
                .update_stage(&mut *tx, id, index as i32, 100.0, ProcessStatus::Finished)
                .await?;

            self.history_repo
                .append(
                    &mut *tx,
                    id,
                    HistoryEventType::Finalized,
                    "Processo finalizado",
                    Some(user.id),
                    None,
                )
                .await?;

            self.notify_creator(&mut tx, &finished, user, "process_finished", "Processo finalizado.")
                .await?;

            finished
        } else {
            let next_index = index + 1;
            let next_dept = process.flow_departments[next_index];
            let label = self.department_repo.label_for(&mut *tx, next_dept).await?;

            let advanced = self
                .process_repo
                .update_stage(
                    &mut *tx,
                    id,
                    next_index as i32,
                    progress_for(next_index, total),
                    ProcessStatus::Active,
                )
                .await?;

            self.history_repo
                .append(
                    &mut *tx,
                    id,
                    HistoryEventType::Advanced,
                    "Processo avançou de etapa",
                    Some(user.id),
                    label.as_deref(),
                )
                .await?;

            advanced
        };

        tx.commit().await?;

        Ok(updated)
    }

    /// Retorna o processo uma etapa. Em processo finalizado, reabre na
    /// etapa em que parou.
    pub async fn revert(&self, id: Uuid, user: &User) -> Result<Process, AppError> {
        let mut tx = self.pool.begin().await?;

        let process = self
            .process_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        let total = process.flow_departments.len();
        let index = process.current_index as usize;

        let updated = if process.status == ProcessStatus::Finished {
            let reopened = self
                .process_repo
                .update_stage(
                    &mut *tx,
                    id,
                    index as i32,
                    progress_for(index, total),
                    ProcessStatus::Active,
                )
                .await?;

            self.history_repo
                .append(
                    &mut *tx,
                    id,
                    HistoryEventType::Reopened,
                    "Processo reaberto",
                    Some(user.id),
                    None,
                )
                .await?;

            reopened
        } else {
            if index == 0 {
                return Err(AppError::WorkflowViolation(
                    "O processo já está na primeira etapa.",
                ));
            }

            let prev_index = index - 1;
            let prev_dept = process.flow_departments[prev_index];
            let label = self.department_repo.label_for(&mut *tx, prev_dept).await?;

            let reverted = self
                .process_repo
                .update_stage(
                    &mut *tx,
                    id,
                    prev_index as i32,
                    progress_for(prev_index, total),
                    ProcessStatus::Active,
                )
                .await?;

            self.history_repo
                .append(
                    &mut *tx,
                    id,
                    HistoryEventType::Returned,
                    "Processo retornou de etapa",
                    Some(user.id),
                    label.as_deref(),
                )
                .await?;

            reverted
        };

        tx.commit().await?;

        Ok(updated)
    }

    async fn notify_creator(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        process: &Process,
        actor: &User,
        kind: &str,
        message: &str,
    ) -> Result<(), AppError> {
        if let Some(recipient) = notification_recipient(process.created_by, actor.id) {
            self.notification_repo
                .create(&mut **tx, recipient, kind, message, Some(process.id))
                .await?;
        }
        Ok(())
    }

    // =========================================================================
    //  INTERLIGADO (continuação)
    // =========================================================================

    /// Cria um processo de continuação ligado ao pai. Só processos
    /// finalizados geram continuação; sem fluxo informado, herda o do pai.
    pub async fn create_continuation(
        &self,
        parent_id: Uuid,
        flow_departments: Option<Vec<Uuid>>,
        template_id: Option<Uuid>,
        user: &User,
    ) -> Result<Process, AppError> {
        let parent = self
            .process_repo
            .find_by_id(&self.pool, parent_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        if parent.status != ProcessStatus::Finished {
            return Err(AppError::WorkflowViolation(
                "Apenas processos finalizados podem gerar continuação.",
            ));
        }

        let flow = match (&flow_departments, template_id) {
            (None, None) => parent.flow_departments.clone(),
            _ => self.resolve_flow(flow_departments, template_id).await?,
        };

        let mut tx = self.pool.begin().await?;

        let child = self
            .process_repo
            .create(&mut *tx, parent.company_id, &flow, Some(parent.id), user.id)
            .await?;

        self.checklist_repo
            .create_for_flow(&mut *tx, child.id, &flow)
            .await?;

        self.history_repo
            .append(
                &mut *tx,
                child.id,
                HistoryEventType::Created,
                "Processo de continuação criado",
                Some(user.id),
                None,
            )
            .await?;

        self.history_repo
            .append(
                &mut *tx,
                parent.id,
                HistoryEventType::Continuation,
                "Continuação interligada criada",
                Some(user.id),
                None,
            )
            .await?;

        tx.commit().await?;

        Ok(child)
    }

    pub async fn list_continuations(&self, parent_id: Uuid) -> Result<Vec<Process>, AppError> {
        self.process_repo
            .find_by_id(&self.pool, parent_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        self.process_repo
            .list_continuations(&self.pool, parent_id)
            .await
    }

    // =========================================================================
    //  FAVORITOS
    // =========================================================================

    pub async fn add_favorite(&self, user_id: Uuid, process_id: Uuid) -> Result<(), AppError> {
        self.process_repo
            .find_by_id(&self.pool, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        self.process_repo
            .add_favorite(&self.pool, user_id, process_id)
            .await
    }

    pub async fn remove_favorite(&self, user_id: Uuid, process_id: Uuid) -> Result<(), AppError> {
        self.process_repo
            .remove_favorite(&self.pool, user_id, process_id)
            .await?;
        Ok(())
    }

    pub async fn list_favorites(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ProcessWithCompany>, AppError> {
        self.process_repo.list_favorites(&self.pool, user_id).await
    }

    // =========================================================================
    //  TAGS
    // =========================================================================

    pub async fn create_tag(&self, name: &str, color: &str) -> Result<Tag, AppError> {
        self.process_repo.create_tag(&self.pool, name, color).await
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        self.process_repo.list_tags(&self.pool).await
    }

    pub async fn delete_tag(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.process_repo.delete_tag(&self.pool, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Tag"));
        }
        Ok(())
    }

    pub async fn attach_tag(
        &self,
        process_id: Uuid,
        tag_id: Uuid,
        user: &User,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.process_repo
            .find_by_id(&mut *tx, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;
        let tag = self
            .process_repo
            .find_tag(&mut *tx, tag_id)
            .await?
            .ok_or(AppError::NotFound("Tag"))?;

        self.process_repo
            .attach_tag(&mut *tx, process_id, tag_id)
            .await?;

        self.history_repo
            .append(
                &mut *tx,
                process_id,
                HistoryEventType::Tag,
                &format!("Tag '{}' adicionada", tag.name),
                Some(user.id),
                None,
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn detach_tag(
        &self,
        process_id: Uuid,
        tag_id: Uuid,
        user: &User,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let tag = self
            .process_repo
            .find_tag(&mut *tx, tag_id)
            .await?
            .ok_or(AppError::NotFound("Tag"))?;

        let removed = self
            .process_repo
            .detach_tag(&mut *tx, process_id, tag_id)
            .await?;

        if removed > 0 {
            self.history_repo
                .append(
                    &mut *tx,
                    process_id,
                    HistoryEventType::Tag,
                    &format!("Tag '{}' removida", tag.name),
                    Some(user.id),
                    None,
                )
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn list_process_tags(&self, process_id: Uuid) -> Result<Vec<Tag>, AppError> {
        self.process_repo
            .list_tags_for_process(&self.pool, process_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indice_da_etapa_segue_o_fluxo() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let flow = vec![a, b, c];

        assert_eq!(stage_index(&flow, a), Some(0));
        assert_eq!(stage_index(&flow, c), Some(2));
        assert_eq!(stage_index(&flow, Uuid::new_v4()), None);
    }

    #[test]
    fn progresso_cresce_por_etapa() {
        assert_eq!(progress_for(0, 4), 0.0);
        assert_eq!(progress_for(1, 4), 25.0);
        assert_eq!(progress_for(3, 4), 75.0);
        assert_eq!(progress_for(4, 4), 100.0);
    }

    #[test]
    fn fluxo_vazio_nao_divide_por_zero() {
        assert_eq!(progress_for(0, 0), 0.0);
    }

    #[test]
    fn departamento_fora_do_fluxo_e_rejeitado() {
        let flow = vec![Uuid::new_v4(), Uuid::new_v4()];

        assert_eq!(ensure_in_flow(&flow, flow[1]).unwrap(), 1);
        assert!(matches!(
            ensure_in_flow(&flow, Uuid::new_v4()),
            Err(AppError::WorkflowViolation(_))
        ));
    }

    #[test]
    fn criador_recebe_notificacao_quando_outro_usuario_age() {
        let creator = Uuid::new_v4();
        let actor = Uuid::new_v4();

        assert_eq!(notification_recipient(Some(creator), actor), Some(creator));
    }

    #[test]
    fn o_proprio_ator_nao_e_notificado() {
        let creator = Uuid::new_v4();

        assert_eq!(notification_recipient(Some(creator), creator), None);
        assert_eq!(notification_recipient(None, creator), None);
    }
}
