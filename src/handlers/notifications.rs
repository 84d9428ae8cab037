use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::notification::Notification,
};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

// GET /api/notifications — só as do próprio usuário.
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    responses((status = 200, description = "Notificações do usuário", body = Vec<Notification>)),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = app_state.notification_service.list(user.id).await?;
    Ok(Json(notifications))
}

// PATCH /api/notifications/{id}/read
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = Uuid, Path, description = "ID da notificação")),
    responses(
        (status = 200, description = "Notificação marcada como lida", body = Notification),
        (status = 404, description = "Notificação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_notification_read(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, AppError> {
    let notification = app_state
        .notification_service
        .mark_read(id, user.id)
        .await?;

    Ok(Json(notification))
}

// POST /api/notifications/read-all
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    tag = "Notifications",
    responses((status = 200, description = "Todas marcadas como lidas", body = MarkAllReadResponse)),
    security(("api_jwt" = []))
)]
pub async fn mark_all_notifications_read(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<MarkAllReadResponse>, AppError> {
    let updated = app_state.notification_service.mark_all_read(user.id).await?;
    Ok(Json(MarkAllReadResponse { updated }))
}
