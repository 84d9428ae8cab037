use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::department::Department};

#[derive(Clone)]
pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria o departamento no fim da fila (position = max + 1).
    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        color: &str,
        icon: Option<&str>,
    ) -> Result<Department, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let department = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (name, color, icon, position)
            VALUES ($1, $2, $3, (SELECT COALESCE(MAX(position), 0) + 1 FROM departments))
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(color)
        .bind(icon)
        .fetch_one(executor)
        .await?;

        Ok(department)
    }

    pub async fn list(&self, only_active: bool) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            r#"
            SELECT * FROM departments
            WHERE active OR NOT $1
            ORDER BY position ASC
            "#,
        )
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Department>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let department =
            sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(department)
    }

    /// Conta quantos dos IDs informados existem e estão ativos.
    /// Usado para validar o fluxo de um processo antes de criá-lo.
    pub async fn count_active<'e, E>(&self, executor: E, ids: &[Uuid]) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT id) FROM departments WHERE active AND id = ANY($1)",
        )
        .bind(ids)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }

    /// Total de departamentos, ativos ou não. A reordenação cobre todos.
    pub async fn count_all<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    /// Nome do departamento, para rotular eventos do histórico.
    pub async fn label_for<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let name: Option<String> =
            sqlx::query_scalar("SELECT name FROM departments WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(name)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> Result<Department, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments SET
                name  = COALESCE($2, name),
                color = COALESCE($3, color),
                icon  = COALESCE($4, icon)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(color)
        .bind(icon)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Departamento"))
    }

    /// Desativa em vez de apagar: processos antigos ainda referenciam o ID.
    pub async fn deactivate<'e, E>(&self, executor: E, id: Uuid) -> Result<Department, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Department>(
            "UPDATE departments SET active = FALSE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Departamento"))
    }

    /// Reordena tudo de uma vez: a posição vira o índice do ID na lista.
    pub async fn reorder<'e, E>(&self, executor: E, ordered_ids: &[Uuid]) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE departments d
            SET position = ord.idx
            FROM UNNEST($1::uuid[]) WITH ORDINALITY AS ord(id, idx)
            WHERE d.id = ord.id
            "#,
        )
        .bind(ordered_ids)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
