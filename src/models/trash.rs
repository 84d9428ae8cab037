use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    checklist::ChecklistItem, comment::Comment, document::Document, history::HistoryEvent,
    process::Process, questionnaire::QuestionnaireResponse,
};

// Mapeia o CREATE TYPE trash_entity do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "trash_entity", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TrashEntity {
    Process,
    Company,
    Document,
}

// Item da lixeira: snapshot JSONB da entidade apagada + prazo de expiração.
// Depois de expires_at o item some das listagens, mesmo antes do purge.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrashItem {
    pub id: Uuid,
    pub entity_type: TrashEntity,
    pub entity_id: Uuid,

    #[schema(value_type = Object)]
    pub payload: Value,

    pub deleted_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// Snapshot completo de um processo para a lixeira.
// Carrega os filhos porque o DELETE em cascata os leva junto.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSnapshot {
    pub process: Process,
    pub checklist: Vec<ChecklistItem>,
    pub history: Vec<HistoryEvent>,
    pub comments: Vec<Comment>,
    pub documents: Vec<Document>,
    pub responses: Vec<QuestionnaireResponse>,
    pub tag_ids: Vec<Uuid>,
}
