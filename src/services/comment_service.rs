use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CommentRepository, DepartmentRepository, HistoryRepository, NotificationRepository,
         ProcessRepository},
    models::{auth::User, comment::Comment, history::HistoryEventType},
    services::process_service::ensure_in_flow,
};

#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    process_repo: ProcessRepository,
    history_repo: HistoryRepository,
    notification_repo: NotificationRepository,
    department_repo: DepartmentRepository,
    pool: PgPool,
}

impl CommentService {
    pub fn new(
        comment_repo: CommentRepository,
        process_repo: ProcessRepository,
        history_repo: HistoryRepository,
        notification_repo: NotificationRepository,
        department_repo: DepartmentRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            comment_repo,
            process_repo,
            history_repo,
            notification_repo,
            department_repo,
            pool,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        process_id: Uuid,
        department_id: Uuid,
        parent_id: Option<Uuid>,
        body: &str,
        mentions: &[Uuid],
        user: &User,
    ) -> Result<Comment, AppError> {
        let mut tx = self.pool.begin().await?;

        let process = self
            .process_repo
            .find_by_id(&mut *tx, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        // O comentário ancora numa etapa do fluxo, não num departamento qualquer.
        ensure_in_flow(&process.flow_departments, department_id)?;

        // Resposta encadeada: o pai precisa existir e ser do mesmo processo.
        if let Some(parent_id) = parent_id {
            let parent = self
                .comment_repo
                .find_by_id(&mut *tx, parent_id)
                .await?
                .ok_or(AppError::NotFound("Comentário"))?;

            if parent.process_id != process_id {
                return Err(AppError::WorkflowViolation(
                    "O comentário pai pertence a outro processo.",
                ));
            }
        }

        let comment = self
            .comment_repo
            .create(&mut *tx, process_id, department_id, user.id, parent_id, body, mentions)
            .await?;

        // Cada menção vira uma notificação (sem notificar o próprio autor).
        let mut notified: Vec<Uuid> = Vec::new();
        for mentioned in mentions {
            if *mentioned == user.id || notified.contains(mentioned) {
                continue;
            }
            notified.push(*mentioned);

            self.notification_repo
                .create(
                    &mut *tx,
                    *mentioned,
                    "mention",
                    &format!("{} mencionou você em um comentário.", user.name),
                    Some(process_id),
                )
                .await?;
        }

        let label = self
            .department_repo
            .label_for(&mut *tx, department_id)
            .await?;

        self.history_repo
            .append(
                &mut *tx,
                process_id,
                HistoryEventType::Comment,
                "Comentário adicionado",
                Some(user.id),
                label.as_deref(),
            )
            .await?;

        tx.commit().await?;

        Ok(comment)
    }

    pub async fn list(&self, process_id: Uuid) -> Result<Vec<Comment>, AppError> {
        self.process_repo
            .find_by_id(&self.pool, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        self.comment_repo.list_by_process(process_id).await
    }

    /// Apaga um comentário (e as respostas, em cascata). Autor ou admin.
    pub async fn delete(&self, comment_id: Uuid, user: &User) -> Result<(), AppError> {
        let comment = self
            .comment_repo
            .find_by_id(&self.pool, comment_id)
            .await?
            .ok_or(AppError::NotFound("Comentário"))?;

        if comment.author_id != user.id && !user.is_admin() {
            return Err(AppError::Forbidden);
        }

        self.comment_repo.delete(&self.pool, comment_id).await?;
        Ok(())
    }
}
