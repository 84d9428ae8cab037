use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::history::HistoryEvent,
};

// GET /api/processes/{id}/history — do mais recente ao mais antigo.
#[utoipa::path(
    get,
    path = "/api/processes/{id}/history",
    tag = "History",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses((status = 200, description = "Histórico do processo", body = Vec<HistoryEvent>)),
    security(("api_jwt" = []))
)]
pub async fn list_history(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<HistoryEvent>>, AppError> {
    let events = app_state.history_service.list(id).await?;
    Ok(Json(events))
}

// DELETE /api/history/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/history/{id}",
    tag = "History",
    params(("id" = Uuid, Path, description = "ID do evento")),
    responses(
        (status = 204, description = "Evento removido"),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_history_event(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.history_service.delete(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
