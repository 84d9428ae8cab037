use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,

    // Ex: "mention", "process_advanced"
    pub kind: String,
    pub message: String,

    pub process_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
