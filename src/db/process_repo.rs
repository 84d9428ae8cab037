use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::process::{Process, ProcessStatus, ProcessWithCompany, Tag},
};

#[derive(Clone)]
pub struct ProcessRepository {
    pool: PgPool,
}

impl ProcessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PROCESSOS
    // =========================================================================

    pub async fn create<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        flow_departments: &[Uuid],
        parent_process_id: Option<Uuid>,
        created_by: Uuid,
    ) -> Result<Process, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let process = sqlx::query_as::<_, Process>(
            r#"
            INSERT INTO processes (company_id, flow_departments, parent_process_id, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(flow_departments)
        .bind(parent_process_id)
        .bind(created_by)
        .fetch_one(executor)
        .await?;

        Ok(process)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Process>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let process = sqlx::query_as::<_, Process>("SELECT * FROM processes WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(process)
    }

    pub async fn list_with_company(&self) -> Result<Vec<ProcessWithCompany>, AppError> {
        let processes = sqlx::query_as::<_, ProcessWithCompany>(
            r#"
            SELECT p.*, c.name AS company_name, c.cnpj AS company_cnpj
            FROM processes p
            INNER JOIN companies c ON c.id = p.company_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(processes)
    }

    pub async fn find_with_company<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<ProcessWithCompany>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let process = sqlx::query_as::<_, ProcessWithCompany>(
            r#"
            SELECT p.*, c.name AS company_name, c.cnpj AS company_cnpj
            FROM processes p
            INNER JOIN companies c ON c.id = p.company_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(process)
    }

    /// Grava o resultado de uma transição (avanço, retorno ou finalização).
    pub async fn update_stage<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        current_index: i32,
        progress: f64,
        status: ProcessStatus,
    ) -> Result<Process, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Process>(
            r#"
            UPDATE processes
            SET current_index = $2, progress = $3, status = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(current_index)
        .bind(progress)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Processo"))
    }

    pub async fn list_continuations<'e, E>(
        &self,
        executor: E,
        parent_id: Uuid,
    ) -> Result<Vec<Process>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let children = sqlx::query_as::<_, Process>(
            "SELECT * FROM processes WHERE parent_process_id = $1 ORDER BY created_at ASC",
        )
        .bind(parent_id)
        .fetch_all(executor)
        .await?;

        Ok(children)
    }

    /// Quantos processos a empresa tem. Empresa com processos não vai para a lixeira.
    pub async fn count_by_company<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM processes WHERE company_id = $1")
                .bind(company_id)
                .fetch_one(executor)
                .await?;

        Ok(count)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM processes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Reinsere um processo restaurado da lixeira, preservando id e datas.
    pub async fn insert_restored<'e, E>(
        &self,
        executor: E,
        process: &Process,
    ) -> Result<Process, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let restored = sqlx::query_as::<_, Process>(
            r#"
            INSERT INTO processes (
                id, company_id, flow_departments, current_index, progress,
                status, parent_process_id, created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(process.id)
        .bind(process.company_id)
        .bind(&process.flow_departments)
        .bind(process.current_index)
        .bind(process.progress)
        .bind(process.status)
        .bind(process.parent_process_id)
        .bind(process.created_by)
        .bind(process.created_at)
        .bind(process.updated_at)
        .fetch_one(executor)
        .await?;

        Ok(restored)
    }

    // =========================================================================
    //  FAVORITOS
    // =========================================================================

    pub async fn add_favorite<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        process_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, process_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(process_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn remove_favorite<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        process_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND process_id = $2")
            .bind(user_id)
            .bind(process_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_favorites<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<Vec<ProcessWithCompany>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let processes = sqlx::query_as::<_, ProcessWithCompany>(
            r#"
            SELECT p.*, c.name AS company_name, c.cnpj AS company_cnpj
            FROM processes p
            INNER JOIN companies c ON c.id = p.company_id
            INNER JOIN favorites f ON f.process_id = p.id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(processes)
    }

    // =========================================================================
    //  TAGS
    // =========================================================================

    pub async fn create_tag<'e, E>(
        &self,
        executor: E,
        name: &str,
        color: &str,
    ) -> Result<Tag, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name, color) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(color)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            AppError::from_unique_violation(
                e,
                AppError::UniqueConstraintViolation(format!("A tag '{}' já existe.", name)),
            )
        })
    }

    pub async fn list_tags<'e, E>(&self, executor: E) -> Result<Vec<Tag>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name ASC")
            .fetch_all(executor)
            .await?;

        Ok(tags)
    }

    pub async fn find_tag<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Tag>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(tag)
    }

    pub async fn delete_tag<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn attach_tag<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
        tag_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO process_tags (process_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(process_id)
        .bind(tag_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn detach_tag<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
        tag_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("DELETE FROM process_tags WHERE process_id = $1 AND tag_id = $2")
                .bind(process_id)
                .bind(tag_id)
                .execute(executor)
                .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_tags_for_process<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
    ) -> Result<Vec<Tag>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.*
            FROM tags t
            INNER JOIN process_tags pt ON pt.tag_id = t.id
            WHERE pt.process_id = $1
            ORDER BY t.name ASC
            "#,
        )
        .bind(process_id)
        .fetch_all(executor)
        .await?;

        Ok(tags)
    }

    pub async fn tag_ids_for_process<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT tag_id FROM process_tags WHERE process_id = $1")
                .bind(process_id)
                .fetch_all(executor)
                .await?;

        Ok(ids)
    }
}
