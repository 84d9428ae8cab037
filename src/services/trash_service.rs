use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        ChecklistRepository, CommentRepository, CompanyRepository, DocumentRepository,
        HistoryRepository, ProcessRepository, QuestionnaireRepository, TrashRepository,
    },
    models::{
        auth::User,
        company::Company,
        document::Document,
        history::HistoryEventType,
        trash::{ProcessSnapshot, TrashEntity, TrashItem},
    },
};

// A lixeira: exclusão vira snapshot JSONB com prazo de validade.
// Itens expirados somem das listagens e o passo de limpeza os apaga de vez.
#[derive(Clone)]
pub struct TrashService {
    trash_repo: TrashRepository,
    process_repo: ProcessRepository,
    checklist_repo: ChecklistRepository,
    history_repo: HistoryRepository,
    comment_repo: CommentRepository,
    document_repo: DocumentRepository,
    questionnaire_repo: QuestionnaireRepository,
    company_repo: CompanyRepository,
    ttl_days: i64,
    pool: PgPool,
}

impl TrashService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trash_repo: TrashRepository,
        process_repo: ProcessRepository,
        checklist_repo: ChecklistRepository,
        history_repo: HistoryRepository,
        comment_repo: CommentRepository,
        document_repo: DocumentRepository,
        questionnaire_repo: QuestionnaireRepository,
        company_repo: CompanyRepository,
        ttl_days: i64,
        pool: PgPool,
    ) -> Self {
        Self {
            trash_repo,
            process_repo,
            checklist_repo,
            history_repo,
            comment_repo,
            document_repo,
            questionnaire_repo,
            company_repo,
            ttl_days,
            pool,
        }
    }

    fn expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::days(self.ttl_days)
    }

    // =========================================================================
    //  EXCLUSÃO (soft delete)
    // =========================================================================

    /// Move um processo para a lixeira. O snapshot carrega os filhos,
    /// porque o DELETE em cascata os leva junto.
    pub async fn soft_delete_process(&self, id: Uuid, user: &User) -> Result<TrashItem, AppError> {
        let process = self
            .process_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        let snapshot = ProcessSnapshot {
            checklist: self.checklist_repo.list_by_process(id).await?,
            history: self.history_repo.list_by_process(id).await?,
            comments: self.comment_repo.list_by_process(id).await?,
            documents: self.document_repo.list_by_process(id).await?,
            responses: self.questionnaire_repo.list_by_process(id).await?,
            tag_ids: self.process_repo.tag_ids_for_process(&self.pool, id).await?,
            process,
        };

        let payload = serde_json::to_value(&snapshot)
            .map_err(|e| anyhow::anyhow!("Falha ao serializar snapshot: {}", e))?;

        let mut tx = self.pool.begin().await?;

        let item = self
            .trash_repo
            .insert(&mut *tx, TrashEntity::Process, id, &payload, user.id, self.expiry())
            .await?;

        self.process_repo.delete(&mut *tx, id).await?;

        tx.commit().await?;

        tracing::info!("Processo {} movido para a lixeira por {}", id, user.email);

        Ok(item)
    }

    /// Move uma empresa para a lixeira. Empresa com processos não vai:
    /// o cascade apagaria processos sem deixar snapshot.
    pub async fn soft_delete_company(&self, id: Uuid, user: &User) -> Result<TrashItem, AppError> {
        let company = self
            .company_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Empresa"))?;

        let in_use = self.process_repo.count_by_company(&self.pool, id).await?;
        if in_use > 0 {
            return Err(AppError::WorkflowViolation(
                "A empresa possui processos; mova-os para a lixeira primeiro.",
            ));
        }

        let payload = serde_json::to_value(&company)
            .map_err(|e| anyhow::anyhow!("Falha ao serializar snapshot: {}", e))?;

        let mut tx = self.pool.begin().await?;

        let item = self
            .trash_repo
            .insert(&mut *tx, TrashEntity::Company, id, &payload, user.id, self.expiry())
            .await?;

        self.company_repo.delete(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(item)
    }

    /// Move um documento para a lixeira. Quem subiu, ou admin.
    pub async fn soft_delete_document(&self, id: Uuid, user: &User) -> Result<TrashItem, AppError> {
        let document = self
            .document_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Documento"))?;

        if document.uploaded_by != user.id && !user.is_admin() {
            return Err(AppError::Forbidden);
        }

        let payload = serde_json::to_value(&document)
            .map_err(|e| anyhow::anyhow!("Falha ao serializar snapshot: {}", e))?;

        let mut tx = self.pool.begin().await?;

        let item = self
            .trash_repo
            .insert(&mut *tx, TrashEntity::Document, id, &payload, user.id, self.expiry())
            .await?;

        self.document_repo.delete(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(item)
    }

    // =========================================================================
    //  CONSULTA E RESTAURAÇÃO
    // =========================================================================

    pub async fn list(&self, user: &User) -> Result<Vec<TrashItem>, AppError> {
        self.trash_repo.list_visible(user.id, user.is_admin()).await
    }

    /// Busca o item aplicando visibilidade e expiração: fora do prazo,
    /// o item não existe mais para ninguém.
    async fn find_accessible(&self, id: Uuid, user: &User) -> Result<TrashItem, AppError> {
        let item = self
            .trash_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Item da lixeira"))?;

        if item.deleted_by != user.id && !user.is_admin() {
            return Err(AppError::Forbidden);
        }

        if item.expires_at <= Utc::now() {
            return Err(AppError::NotFound("Item da lixeira"));
        }

        Ok(item)
    }

    pub async fn restore(&self, id: Uuid, user: &User) -> Result<(), AppError> {
        let item = self.find_accessible(id, user).await?;

        match item.entity_type {
            TrashEntity::Process => self.restore_process(&item, user).await,
            TrashEntity::Company => self.restore_company(&item).await,
            TrashEntity::Document => self.restore_document(&item, user).await,
        }
    }

    async fn restore_process(&self, item: &TrashItem, user: &User) -> Result<(), AppError> {
        let snapshot: ProcessSnapshot = serde_json::from_value(item.payload.clone())
            .map_err(|e| anyhow::anyhow!("Snapshot de processo corrompido: {}", e))?;

        self.company_repo
            .find_by_id(&self.pool, snapshot.process.company_id)
            .await?
            .ok_or(AppError::WorkflowViolation(
                "A empresa do processo não existe mais; restaure-a primeiro.",
            ))?;

        let mut tx = self.pool.begin().await?;

        self.process_repo
            .insert_restored(&mut *tx, &snapshot.process)
            .await?;

        for checklist_item in &snapshot.checklist {
            self.checklist_repo
                .insert_restored(&mut *tx, checklist_item)
                .await?;
        }

        for event in &snapshot.history {
            self.history_repo.insert_restored(&mut *tx, event).await?;
        }

        // A ordem cronológica garante que pais venham antes das respostas.
        for comment in &snapshot.comments {
            self.comment_repo.insert_restored(&mut *tx, comment).await?;
        }

        for document in &snapshot.documents {
            self.document_repo
                .insert_restored(&mut *tx, document)
                .await?;
        }

        for response in &snapshot.responses {
            self.questionnaire_repo
                .insert_restored(&mut *tx, response)
                .await?;
        }

        // Tags apagadas nesse meio-tempo são simplesmente ignoradas.
        for tag_id in &snapshot.tag_ids {
            if self
                .process_repo
                .find_tag(&mut *tx, *tag_id)
                .await?
                .is_some()
            {
                self.process_repo
                    .attach_tag(&mut *tx, snapshot.process.id, *tag_id)
                    .await?;
            }
        }

        self.history_repo
            .append(
                &mut *tx,
                snapshot.process.id,
                HistoryEventType::Restored,
                "Processo restaurado da lixeira",
                Some(user.id),
                None,
            )
            .await?;

        self.trash_repo.delete(&mut *tx, item.id).await?;

        tx.commit().await?;

        tracing::info!("Processo {} restaurado da lixeira", snapshot.process.id);

        Ok(())
    }

    async fn restore_company(&self, item: &TrashItem) -> Result<(), AppError> {
        let company: Company = serde_json::from_value(item.payload.clone())
            .map_err(|e| anyhow::anyhow!("Snapshot de empresa corrompido: {}", e))?;

        let mut tx = self.pool.begin().await?;

        // CNPJ reutilizado nesse meio-tempo vira 409.
        self.company_repo.insert_restored(&mut *tx, &company).await?;
        self.trash_repo.delete(&mut *tx, item.id).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn restore_document(&self, item: &TrashItem, user: &User) -> Result<(), AppError> {
        let document: Document = serde_json::from_value(item.payload.clone())
            .map_err(|e| anyhow::anyhow!("Snapshot de documento corrompido: {}", e))?;

        self.process_repo
            .find_by_id(&self.pool, document.process_id)
            .await?
            .ok_or(AppError::WorkflowViolation(
                "O processo do documento não existe mais; restaure-o primeiro.",
            ))?;

        let mut tx = self.pool.begin().await?;

        self.document_repo
            .insert_restored(&mut *tx, &document)
            .await?;

        self.history_repo
            .append(
                &mut *tx,
                document.process_id,
                HistoryEventType::Restored,
                &format!("Documento '{}' restaurado da lixeira", document.file_name),
                Some(user.id),
                None,
            )
            .await?;

        self.trash_repo.delete(&mut *tx, item.id).await?;

        tx.commit().await?;

        Ok(())
    }

    // =========================================================================
    //  EXCLUSÃO DEFINITIVA E LIMPEZA
    // =========================================================================

    pub async fn delete_forever(&self, id: Uuid, user: &User) -> Result<(), AppError> {
        let item = self.find_accessible(id, user).await?;
        self.trash_repo.delete(&self.pool, item.id).await?;
        Ok(())
    }

    /// O passo de limpeza, pensado para ser chamado por um cron externo.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let purged = self.trash_repo.purge_expired(&self.pool).await?;
        if purged > 0 {
            tracing::info!("Lixeira: {} itens expirados removidos", purged);
        }
        Ok(purged)
    }
}
