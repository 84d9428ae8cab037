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
    models::template::{CreateTemplatePayload, Template},
};

// POST /api/templates
#[utoipa::path(
    post,
    path = "/api/templates",
    tag = "Templates",
    request_body = CreateTemplatePayload,
    responses(
        (status = 201, description = "Template criado", body = Template),
        (status = 422, description = "Departamentos inexistentes ou desativados")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_template(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateTemplatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let template = app_state
        .template_service
        .create(&payload.name, &payload.department_ids, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(template)))
}

// GET /api/templates
#[utoipa::path(
    get,
    path = "/api/templates",
    tag = "Templates",
    responses((status = 200, description = "Lista de templates", body = Vec<Template>)),
    security(("api_jwt" = []))
)]
pub async fn list_templates(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Template>>, AppError> {
    let templates = app_state.template_service.list().await?;
    Ok(Json(templates))
}

// GET /api/templates/{id}
#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    tag = "Templates",
    params(("id" = Uuid, Path, description = "ID do template")),
    responses(
        (status = 200, description = "Template", body = Template),
        (status = 404, description = "Template não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_template(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Template>, AppError> {
    let template = app_state.template_service.get(id).await?;
    Ok(Json(template))
}

// DELETE /api/templates/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/templates/{id}",
    tag = "Templates",
    params(("id" = Uuid, Path, description = "ID do template")),
    responses(
        (status = 204, description = "Template removido"),
        (status = 404, description = "Template não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_template(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.template_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
