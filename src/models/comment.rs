use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Comentário encadeado (parent_id) com lista de menções.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub process_id: Uuid,
    pub department_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub body: String,
    pub mentions: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentPayload {
    pub department_id: Uuid,
    pub parent_id: Option<Uuid>,

    #[validate(length(min = 1, message = "O comentário não pode ser vazio."))]
    pub body: String,

    #[serde(default)]
    pub mentions: Vec<Uuid>,
}
