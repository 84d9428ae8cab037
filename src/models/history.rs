use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE history_event_type do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "history_event_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryEventType {
    Created,
    Advanced,
    Returned,
    Finalized,
    Reopened,
    Checklist,
    Comment,
    Document,
    Tag,
    Continuation,
    Restored,
}

// Evento de auditoria: append-only. Nunca há UPDATE nesta tabela;
// DELETE existe apenas para admins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub id: Uuid,
    pub process_id: Uuid,
    pub event_type: HistoryEventType,
    pub action: String,
    pub actor_id: Option<Uuid>,
    pub department_label: Option<String>,
    pub created_at: DateTime<Utc>,
}
