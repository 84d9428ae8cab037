use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProcessRepository, QuestionnaireRepository},
    models::{auth::User, questionnaire::QuestionnaireResponse},
    services::process_service::ensure_in_flow,
};

#[derive(Clone)]
pub struct QuestionnaireService {
    repo: QuestionnaireRepository,
    process_repo: ProcessRepository,
    pool: PgPool,
}

impl QuestionnaireService {
    pub fn new(repo: QuestionnaireRepository, process_repo: ProcessRepository, pool: PgPool) -> Self {
        Self {
            repo,
            process_repo,
            pool,
        }
    }

    pub async fn submit(
        &self,
        process_id: Uuid,
        department_id: Uuid,
        answers: Value,
        user: &User,
    ) -> Result<QuestionnaireResponse, AppError> {
        if !answers.is_object() {
            return Err(AppError::WorkflowViolation(
                "As respostas do questionário devem ser um objeto JSON.",
            ));
        }

        let process = self
            .process_repo
            .find_by_id(&self.pool, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        ensure_in_flow(&process.flow_departments, department_id)?;

        self.repo
            .create(&self.pool, process_id, department_id, user.id, &answers)
            .await
    }

    pub async fn list(&self, process_id: Uuid) -> Result<Vec<QuestionnaireResponse>, AppError> {
        self.process_repo
            .find_by_id(&self.pool, process_id)
            .await?
            .ok_or(AppError::NotFound("Processo"))?;

        self.repo.list_by_process(process_id).await
    }
}
