use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::department::{
        CreateDepartmentPayload, Department, ReorderDepartmentsPayload, UpdateDepartmentPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListDepartmentsQuery {
    // active=true esconde os departamentos desativados.
    pub active: Option<bool>,
}

// POST /api/departments (admin)
#[utoipa::path(
    post,
    path = "/api/departments",
    tag = "Departments",
    request_body = CreateDepartmentPayload,
    responses((status = 201, description = "Departamento criado", body = Department)),
    security(("api_jwt" = []))
)]
pub async fn create_department(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDepartmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let department = app_state
        .department_service
        .create(&payload.name, &payload.color, payload.icon.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(department)))
}

// GET /api/departments
#[utoipa::path(
    get,
    path = "/api/departments",
    tag = "Departments",
    params(ListDepartmentsQuery),
    responses((status = 200, description = "Lista de departamentos", body = Vec<Department>)),
    security(("api_jwt" = []))
)]
pub async fn list_departments(
    State(app_state): State<AppState>,
    Query(query): Query<ListDepartmentsQuery>,
) -> Result<Json<Vec<Department>>, AppError> {
    let departments = app_state
        .department_service
        .list(query.active.unwrap_or(false))
        .await?;

    Ok(Json(departments))
}

// GET /api/departments/{id}
#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    tag = "Departments",
    params(("id" = Uuid, Path, description = "ID do departamento")),
    responses(
        (status = 200, description = "Departamento", body = Department),
        (status = 404, description = "Departamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_department(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Department>, AppError> {
    let department = app_state.department_service.get(id).await?;
    Ok(Json(department))
}

// PATCH /api/departments/reorder (admin)
//
// Registrada antes de /{id} para a rota literal vencer a captura.
#[utoipa::path(
    patch,
    path = "/api/departments/reorder",
    tag = "Departments",
    request_body = ReorderDepartmentsPayload,
    responses(
        (status = 204, description = "Ordem atualizada"),
        (status = 422, description = "Lista de ordenação vazia")
    ),
    security(("api_jwt" = []))
)]
pub async fn reorder_departments(
    State(app_state): State<AppState>,
    Json(payload): Json<ReorderDepartmentsPayload>,
) -> Result<StatusCode, AppError> {
    app_state
        .department_service
        .reorder(&payload.ordered_ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/departments/{id} (admin)
#[utoipa::path(
    patch,
    path = "/api/departments/{id}",
    tag = "Departments",
    request_body = UpdateDepartmentPayload,
    params(("id" = Uuid, Path, description = "ID do departamento")),
    responses(
        (status = 200, description = "Departamento atualizado", body = Department),
        (status = 404, description = "Departamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_department(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDepartmentPayload>,
) -> Result<Json<Department>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let department = app_state
        .department_service
        .update(
            id,
            payload.name.as_deref(),
            payload.color.as_deref(),
            payload.icon.as_deref(),
        )
        .await?;

    Ok(Json(department))
}

// DELETE /api/departments/{id} (admin) — desativa, nunca apaga.
#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    tag = "Departments",
    params(("id" = Uuid, Path, description = "ID do departamento")),
    responses(
        (status = 200, description = "Departamento desativado", body = Department),
        (status = 404, description = "Departamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_department(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Department>, AppError> {
    let department = app_state.department_service.deactivate(id).await?;
    Ok(Json(department))
}
