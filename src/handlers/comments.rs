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
    models::comment::{Comment, CreateCommentPayload},
};

// POST /api/processes/{id}/comments
#[utoipa::path(
    post,
    path = "/api/processes/{id}/comments",
    tag = "Comments",
    request_body = CreateCommentPayload,
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 201, description = "Comentário criado", body = Comment),
        (status = 422, description = "Comentário pai de outro processo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_comment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateCommentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let comment = app_state
        .comment_service
        .create(
            id,
            payload.department_id,
            payload.parent_id,
            &payload.body,
            &payload.mentions,
            &user,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

// GET /api/processes/{id}/comments — do mais antigo ao mais recente.
#[utoipa::path(
    get,
    path = "/api/processes/{id}/comments",
    tag = "Comments",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses((status = 200, description = "Comentários do processo", body = Vec<Comment>)),
    security(("api_jwt" = []))
)]
pub async fn list_comments(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = app_state.comment_service.list(id).await?;
    Ok(Json(comments))
}

// DELETE /api/comments/{id} — autor ou admin.
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "Comments",
    params(("id" = Uuid, Path, description = "ID do comentário")),
    responses(
        (status = 204, description = "Comentário removido"),
        (status = 403, description = "Apenas o autor ou admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_comment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.comment_service.delete(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
