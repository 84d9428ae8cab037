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
        company::{Company, CreateCompanyPayload, UpdateCompanyPayload},
        trash::TrashItem,
    },
};

// POST /api/companies
#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "Companies",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Company),
        (status = 409, description = "CNPJ já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state
        .company_service
        .create(
            &payload.name,
            &payload.cnpj,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.city.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

// GET /api/companies
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    responses((status = 200, description = "Lista de empresas", body = Vec<Company>)),
    security(("api_jwt" = []))
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies = app_state.company_service.list().await?;
    Ok(Json(companies))
}

// GET /api/companies/{id}
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa", body = Company),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>, AppError> {
    let company = app_state.company_service.get(id).await?;
    Ok(Json(company))
}

// PATCH /api/companies/{id}
#[utoipa::path(
    patch,
    path = "/api/companies/{id}",
    tag = "Companies",
    request_body = UpdateCompanyPayload,
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 409, description = "CNPJ já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<Json<Company>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state
        .company_service
        .update(
            id,
            payload.name.as_deref(),
            payload.cnpj.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.city.as_deref(),
        )
        .await?;

    Ok(Json(company))
}

// DELETE /api/companies/{id} — vai para a lixeira, não some de vez.
#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa movida para a lixeira", body = TrashItem),
        (status = 422, description = "Empresa ainda possui processos")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_company(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TrashItem>, AppError> {
    let item = app_state.trash_service.soft_delete_company(id, &user).await?;
    Ok(Json(item))
}
