use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Respostas de questionário por (processo, departamento).
// O formulário é livre: as respostas viajam como objeto JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponse {
    pub id: Uuid,
    pub process_id: Uuid,
    pub department_id: Uuid,
    pub respondent_id: Uuid,

    #[schema(value_type = Object)]
    pub answers: Value,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionnairePayload {
    pub department_id: Uuid,

    #[schema(value_type = Object)]
    pub answers: Value,
}
