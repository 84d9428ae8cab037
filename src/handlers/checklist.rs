use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::checklist::ChecklistItem,
};

// GET /api/processes/{id}/checklist
#[utoipa::path(
    get,
    path = "/api/processes/{id}/checklist",
    tag = "Checklist",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses((status = 200, description = "Itens na ordem do fluxo", body = Vec<ChecklistItem>)),
    security(("api_jwt" = []))
)]
pub async fn list_checklist(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChecklistItem>>, AppError> {
    let items = app_state.checklist_service.list(id).await?;
    Ok(Json(items))
}

// POST /api/processes/{id}/checklist/{department_id}/complete
#[utoipa::path(
    post,
    path = "/api/processes/{id}/checklist/{department_id}/complete",
    tag = "Checklist",
    params(
        ("id" = Uuid, Path, description = "ID do processo"),
        ("department_id" = Uuid, Path, description = "ID do departamento")
    ),
    responses(
        (status = 200, description = "Item concluído", body = ChecklistItem),
        (status = 422, description = "Etapa anterior pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn complete_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, department_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ChecklistItem>, AppError> {
    let item = app_state
        .checklist_service
        .complete(id, department_id, &user)
        .await?;

    Ok(Json(item))
}

// POST /api/processes/{id}/checklist/{department_id}/uncomplete
#[utoipa::path(
    post,
    path = "/api/processes/{id}/checklist/{department_id}/uncomplete",
    tag = "Checklist",
    params(
        ("id" = Uuid, Path, description = "ID do processo"),
        ("department_id" = Uuid, Path, description = "ID do departamento")
    ),
    responses(
        (status = 200, description = "Item reaberto", body = ChecklistItem),
        (status = 422, description = "Etapa seguinte já concluída")
    ),
    security(("api_jwt" = []))
)]
pub async fn uncomplete_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, department_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ChecklistItem>, AppError> {
    let item = app_state
        .checklist_service
        .uncomplete(id, department_id, &user)
        .await?;

    Ok(Json(item))
}
