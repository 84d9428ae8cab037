use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        document::{CreateDocumentPayload, Document},
        trash::TrashItem,
    },
};

// POST /api/processes/{id}/documents — só os metadados; o arquivo em si
// mora no object store externo.
#[utoipa::path(
    post,
    path = "/api/processes/{id}/documents",
    tag = "Documents",
    request_body = CreateDocumentPayload,
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 201, description = "Documento registrado", body = Document),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_document(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let document = app_state
        .document_service
        .register(
            id,
            &payload.file_name,
            &payload.file_url,
            &payload.content_type,
            payload.size_bytes,
            payload.visibility,
            &payload.allowed_roles,
            &payload.allowed_users,
            &user,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

// GET /api/processes/{id}/documents — filtrado pela política de visibilidade.
#[utoipa::path(
    get,
    path = "/api/processes/{id}/documents",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses((status = 200, description = "Documentos visíveis ao usuário", body = Vec<Document>)),
    security(("api_jwt" = []))
)]
pub async fn list_documents(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = app_state.document_service.list_visible(id, &user).await?;
    Ok(Json(documents))
}

// DELETE /api/documents/{id} — quem subiu ou admin; vai para a lixeira.
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 200, description = "Documento movido para a lixeira", body = TrashItem),
        (status = 403, description = "Apenas quem subiu ou admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_document(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TrashItem>, AppError> {
    let item = app_state
        .trash_service
        .soft_delete_document(id, &user)
        .await?;

    Ok(Json(item))
}
