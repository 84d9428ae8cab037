use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::questionnaire::QuestionnaireResponse};

#[derive(Clone)]
pub struct QuestionnaireRepository {
    pool: PgPool,
}

impl QuestionnaireRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        process_id: Uuid,
        department_id: Uuid,
        respondent_id: Uuid,
        answers: &Value,
    ) -> Result<QuestionnaireResponse, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let response = sqlx::query_as::<_, QuestionnaireResponse>(
            r#"
            INSERT INTO questionnaire_responses (process_id, department_id, respondent_id, answers)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(process_id)
        .bind(department_id)
        .bind(respondent_id)
        .bind(answers)
        .fetch_one(executor)
        .await?;

        Ok(response)
    }

    pub async fn list_by_process(
        &self,
        process_id: Uuid,
    ) -> Result<Vec<QuestionnaireResponse>, AppError> {
        let responses = sqlx::query_as::<_, QuestionnaireResponse>(
            "SELECT * FROM questionnaire_responses WHERE process_id = $1 ORDER BY created_at ASC",
        )
        .bind(process_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(responses)
    }

    /// Reinsere uma resposta restaurada da lixeira.
    pub async fn insert_restored<'e, E>(
        &self,
        executor: E,
        response: &QuestionnaireResponse,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO questionnaire_responses (id, process_id, department_id, respondent_id, answers, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(response.id)
        .bind(response.process_id)
        .bind(response.department_id)
        .bind(response.respondent_id)
        .bind(&response.answers)
        .bind(response.created_at)
        .execute(executor)
        .await?;

        Ok(())
    }
}
