use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mapeia o CREATE TYPE process_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "process_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessStatus {
    Active,
    Finished,
}

// Processo: a empresa atravessando a sequência fixa de departamentos.
// O fluxo é congelado na criação; current_index aponta para a etapa atual.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: Uuid,
    pub company_id: Uuid,

    // A sequência ordenada de departamentos (UUID[] no Postgres).
    pub flow_departments: Vec<Uuid>,
    pub current_index: i32,

    // Percentual de etapas vencidas (0.0 a 100.0).
    pub progress: f64,

    pub status: ProcessStatus,

    // Encadeamento "interligado": processo de continuação aponta para o pai.
    pub parent_process_id: Option<Uuid>,

    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Processo com os dados da empresa juntados, para as listagens.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessWithCompany {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub company_cnpj: String,
    pub flow_departments: Vec<Uuid>,
    pub current_index: i32,
    pub progress: f64,
    pub status: ProcessStatus,
    pub parent_process_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcessPayload {
    pub company_id: Uuid,

    // Ou uma lista explícita de departamentos, ou um template. Um dos dois.
    pub flow_departments: Option<Vec<Uuid>>,
    pub template_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContinuationPayload {
    pub flow_departments: Option<Vec<Uuid>>,
    pub template_id: Option<Uuid>,
}

// --- TAGS ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    #[serde(default = "default_tag_color")]
    pub color: String,
}

fn default_tag_color() -> String {
    "#9e9e9e".to_string()
}
