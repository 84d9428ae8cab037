use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::company::Company};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        cnpj: &str,
        email: Option<&str>,
        phone: Option<&str>,
        city: Option<&str>,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, cnpj, email, phone, city)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(cnpj)
        .bind(email)
        .bind(phone)
        .bind(city)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, AppError::CnpjAlreadyExists))
    }

    pub async fn list(&self) -> Result<Vec<Company>, AppError> {
        let companies =
            sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(companies)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Company>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(company)
    }

    // COALESCE mantém o valor atual quando o campo não veio no payload.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        cnpj: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        city: Option<&str>,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name  = COALESCE($2, name),
                cnpj  = COALESCE($3, cnpj),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                city  = COALESCE($6, city),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(cnpj)
        .bind(email)
        .bind(phone)
        .bind(city)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, AppError::CnpjAlreadyExists))?
        .ok_or(AppError::NotFound("Empresa"))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Reinsere uma empresa restaurada da lixeira, preservando id e datas.
    pub async fn insert_restored<'e, E>(
        &self,
        executor: E,
        company: &Company,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (id, name, cnpj, email, phone, city, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.cnpj)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.city)
        .bind(company.created_at)
        .bind(company.updated_at)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_unique_violation(e, AppError::CnpjAlreadyExists))
    }
}
