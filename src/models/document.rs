use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::UserRole;

// Mapeia o CREATE TYPE document_visibility do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_visibility", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentVisibility {
    Public,
    Roles,
    Users,
}

// Metadados do arquivo + política de visibilidade.
// O upload em si vai para o object store externo; aqui fica só a referência.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub process_id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub visibility: DocumentVisibility,
    pub allowed_roles: Vec<UserRole>,
    pub allowed_users: Vec<Uuid>,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentPayload {
    #[validate(length(min = 1, message = "required"))]
    pub file_name: String,

    #[validate(url(message = "URL inválida."))]
    pub file_url: String,

    #[validate(length(min = 1, message = "required"))]
    pub content_type: String,

    #[validate(range(min = 1, message = "O tamanho deve ser maior que zero."))]
    pub size_bytes: i64,

    pub visibility: DocumentVisibility,

    #[serde(default)]
    pub allowed_roles: Vec<UserRole>,
    #[serde(default)]
    pub allowed_users: Vec<Uuid>,
}
