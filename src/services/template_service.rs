use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DepartmentRepository, TemplateRepository},
    models::{auth::User, template::Template},
};

#[derive(Clone)]
pub struct TemplateService {
    repo: TemplateRepository,
    department_repo: DepartmentRepository,
    pool: PgPool,
}

impl TemplateService {
    pub fn new(repo: TemplateRepository, department_repo: DepartmentRepository, pool: PgPool) -> Self {
        Self {
            repo,
            department_repo,
            pool,
        }
    }

    pub async fn create(
        &self,
        name: &str,
        department_ids: &[Uuid],
        user: &User,
    ) -> Result<Template, AppError> {
        // O template só aceita departamentos existentes e ativos.
        let active = self
            .department_repo
            .count_active(&self.pool, department_ids)
            .await?;
        if active as usize != department_ids.len() {
            return Err(AppError::WorkflowViolation(
                "O template contém departamentos inexistentes ou desativados.",
            ));
        }

        self.repo
            .create(&self.pool, name, department_ids, user.id)
            .await
    }

    pub async fn list(&self) -> Result<Vec<Template>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Template, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Template"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(&self.pool, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Template"));
        }
        Ok(())
    }
}
