use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentRepository, HistoryRepository, ProcessRepository},
    models::{
        auth::{User, UserRole},
        document::{Document, DocumentVisibility},
        history::HistoryEventType,
    },
};

/// A política de visibilidade de um documento.
/// Quem subiu o arquivo e admins sempre enxergam; o resto segue a política.
pub fn can_view(user_id: Uuid, role: UserRole, document: &Document) -> bool {
    if role == UserRole::Admin || document.uploaded_by == user_id {
        return true;
    }

    match document.visibility {
        DocumentVisibility::Public => true,
        DocumentVisibility::Roles => document.allowed_roles.contains(&role),
        DocumentVisibility::Users => document.allowed_users.contains(&user_id),
    }
}

#[derive(Clone)]
pub struct DocumentService {
    document_repo: DocumentRepository,
    process_repo: ProcessRepository,
    history_repo: HistoryRepository,
    pool: PgPool,
}

impl DocumentService {
    pub fn new(
        document_repo: DocumentRepository,
        process_repo: ProcessRepository,
        history_repo: HistoryRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            document_repo,
            process_repo,
            history_repo,
            pool,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn register(
        &self,
        process_id: Uuid,
        file_name: &str,
        file_url: &str,
        content_type: &str,
        size_bytes: i64,
        visibility: DocumentVisibility,
        allowed_roles: &[UserRole],
        allowed_users: &[Uuid],
        user: &User,
    ) -> Result<Document, AppError> {
        let mut tx = self.pool.begin().await?;

        self.process_repo
            .find_by_id(&mut *tx, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        let document = self
            .document_repo
            .create(
                &mut *tx,
                process_id,
                file_name,
                file_url,
                content_type,
                size_bytes,
                visibility,
                allowed_roles,
                allowed_users,
                user.id,
            )
            .await?;

        self.history_repo
            .append(
                &mut *tx,
                process_id,
                HistoryEventType::Document,
                &format!("Documento '{}' anexado", file_name),
                Some(user.id),
                None,
            )
            .await?;

        tx.commit().await?;

        Ok(document)
    }

    /// Lista os documentos do processo que o usuário pode ver.
    pub async fn list_visible(
        &self,
        process_id: Uuid,
        user: &User,
    ) -> Result<Vec<Document>, AppError> {
        self.process_repo
            .find_by_id(&self.pool, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        let documents = self.document_repo.list_by_process(process_id).await?;

        Ok(documents
            .into_iter()
            .filter(|d| can_view(user.id, user.role, d))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn document(
        visibility: DocumentVisibility,
        allowed_roles: Vec<UserRole>,
        allowed_users: Vec<Uuid>,
        uploaded_by: Uuid,
    ) -> Document {
        Document {
            id: Uuid::new_v4(),
            process_id: Uuid::new_v4(),
            file_name: "contrato.pdf".into(),
            file_url: "https://storage.example.com/contrato.pdf".into(),
            content_type: "application/pdf".into(),
            size_bytes: 1024,
            visibility,
            allowed_roles,
            allowed_users,
            uploaded_by,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn publico_todo_mundo_ve() {
        let doc = document(DocumentVisibility::Public, vec![], vec![], Uuid::new_v4());
        assert!(can_view(Uuid::new_v4(), UserRole::User, &doc));
    }

    #[test]
    fn por_papel_filtra_quem_nao_tem() {
        let doc = document(
            DocumentVisibility::Roles,
            vec![UserRole::Manager],
            vec![],
            Uuid::new_v4(),
        );
        assert!(can_view(Uuid::new_v4(), UserRole::Manager, &doc));
        assert!(!can_view(Uuid::new_v4(), UserRole::User, &doc));
    }

    #[test]
    fn por_usuario_filtra_quem_esta_fora_da_lista() {
        let allowed = Uuid::new_v4();
        let doc = document(DocumentVisibility::Users, vec![], vec![allowed], Uuid::new_v4());
        assert!(can_view(allowed, UserRole::User, &doc));
        assert!(!can_view(Uuid::new_v4(), UserRole::User, &doc));
    }

    #[test]
    fn quem_subiu_sempre_ve() {
        let uploader = Uuid::new_v4();
        let doc = document(DocumentVisibility::Users, vec![], vec![], uploader);
        assert!(can_view(uploader, UserRole::User, &doc));
    }

    #[test]
    fn admin_sempre_ve() {
        let doc = document(DocumentVisibility::Users, vec![], vec![], Uuid::new_v4());
        assert!(can_view(Uuid::new_v4(), UserRole::Admin, &doc));
    }
}
