use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::CompanyRepository, models::company::Company};

#[derive(Clone)]
pub struct CompanyService {
    repo: CompanyRepository,
    pool: PgPool,
}

impl CompanyService {
    pub fn new(repo: CompanyRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create(
        &self,
        name: &str,
        cnpj: &str,
        email: Option<&str>,
        phone: Option<&str>,
        city: Option<&str>,
    ) -> Result<Company, AppError> {
        self.repo
            .create(&self.pool, name, cnpj, email, phone, city)
            .await
    }

    pub async fn list(&self) -> Result<Vec<Company>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Company, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Empresa"))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        cnpj: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        city: Option<&str>,
    ) -> Result<Company, AppError> {
        self.repo
            .update(&self.pool, id, name, cnpj, email, phone, city)
            .await
    }
}
