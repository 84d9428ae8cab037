use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::trash::TrashItem,
};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub purged: u64,
}

// GET /api/trash — itens do usuário (admin vê todos), sem os expirados.
#[utoipa::path(
    get,
    path = "/api/trash",
    tag = "Trash",
    responses((status = 200, description = "Itens na lixeira", body = Vec<TrashItem>)),
    security(("api_jwt" = []))
)]
pub async fn list_trash(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<TrashItem>>, AppError> {
    let items = app_state.trash_service.list(&user).await?;
    Ok(Json(items))
}

// POST /api/trash/{id}/restore
#[utoipa::path(
    post,
    path = "/api/trash/{id}/restore",
    tag = "Trash",
    params(("id" = Uuid, Path, description = "ID do item da lixeira")),
    responses(
        (status = 204, description = "Item restaurado"),
        (status = 409, description = "Conflito ao restaurar (ex.: CNPJ reutilizado)"),
        (status = 422, description = "Dependência do item não existe mais")
    ),
    security(("api_jwt" = []))
)]
pub async fn restore_trash_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.trash_service.restore(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/trash/{id} — exclusão definitiva, sem volta.
#[utoipa::path(
    delete,
    path = "/api/trash/{id}",
    tag = "Trash",
    params(("id" = Uuid, Path, description = "ID do item da lixeira")),
    responses(
        (status = 204, description = "Item removido em definitivo"),
        (status = 404, description = "Item não encontrado ou expirado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_trash_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.trash_service.delete_forever(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/trash/cleanup (admin) — pensado para um cron externo.
#[utoipa::path(
    post,
    path = "/api/trash/cleanup",
    tag = "Trash",
    responses((status = 200, description = "Itens expirados removidos", body = CleanupResponse)),
    security(("api_jwt" = []))
)]
pub async fn cleanup_trash(
    State(app_state): State<AppState>,
) -> Result<Json<CleanupResponse>, AppError> {
    let purged = app_state.trash_service.purge_expired().await?;
    Ok(Json(CleanupResponse { purged }))
}
