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
        process::{
            CreateContinuationPayload, CreateProcessPayload, CreateTagPayload, Process,
            ProcessWithCompany, Tag,
        },
        trash::TrashItem,
    },
};

// POST /api/processes
#[utoipa::path(
    post,
    path = "/api/processes",
    tag = "Processes",
    request_body = CreateProcessPayload,
    responses(
        (status = 201, description = "Processo criado", body = Process),
        (status = 422, description = "Fluxo inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_process(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateProcessPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let process = app_state
        .process_service
        .create_process(
            payload.company_id,
            payload.flow_departments,
            payload.template_id,
            &user,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(process)))
}

// GET /api/processes
#[utoipa::path(
    get,
    path = "/api/processes",
    tag = "Processes",
    responses((status = 200, description = "Lista de processos", body = Vec<ProcessWithCompany>)),
    security(("api_jwt" = []))
)]
pub async fn list_processes(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ProcessWithCompany>>, AppError> {
    let processes = app_state.process_service.list_processes().await?;
    Ok(Json(processes))
}

// GET /api/processes/{id}
#[utoipa::path(
    get,
    path = "/api/processes/{id}",
    tag = "Processes",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo", body = ProcessWithCompany),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_process(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProcessWithCompany>, AppError> {
    let process = app_state.process_service.get_process(id).await?;
    Ok(Json(process))
}

// POST /api/processes/{id}/advance
#[utoipa::path(
    post,
    path = "/api/processes/{id}/advance",
    tag = "Processes",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo avançado (ou finalizado)", body = Process),
        (status = 422, description = "Checklist pendente ou processo finalizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn advance_process(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Process>, AppError> {
    let process = app_state.process_service.advance(id, &user).await?;
    Ok(Json(process))
}

// POST /api/processes/{id}/revert
#[utoipa::path(
    post,
    path = "/api/processes/{id}/revert",
    tag = "Processes",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo retornado (ou reaberto)", body = Process),
        (status = 422, description = "Processo já está na primeira etapa")
    ),
    security(("api_jwt" = []))
)]
pub async fn revert_process(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Process>, AppError> {
    let process = app_state.process_service.revert(id, &user).await?;
    Ok(Json(process))
}

// DELETE /api/processes/{id} — snapshot completo para a lixeira.
#[utoipa::path(
    delete,
    path = "/api/processes/{id}",
    tag = "Processes",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo movido para a lixeira", body = TrashItem),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_process(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TrashItem>, AppError> {
    let item = app_state.trash_service.soft_delete_process(id, &user).await?;
    Ok(Json(item))
}

// =============================================================================
//  INTERLIGADO (continuações)
// =============================================================================

// POST /api/processes/{id}/continuations
#[utoipa::path(
    post,
    path = "/api/processes/{id}/continuations",
    tag = "Processes",
    request_body = CreateContinuationPayload,
    params(("id" = Uuid, Path, description = "ID do processo pai")),
    responses(
        (status = 201, description = "Continuação criada", body = Process),
        (status = 422, description = "Processo pai não finalizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_continuation(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateContinuationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let child = app_state
        .process_service
        .create_continuation(id, payload.flow_departments, payload.template_id, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(child)))
}

// GET /api/processes/{id}/continuations
#[utoipa::path(
    get,
    path = "/api/processes/{id}/continuations",
    tag = "Processes",
    params(("id" = Uuid, Path, description = "ID do processo pai")),
    responses((status = 200, description = "Continuações do processo", body = Vec<Process>)),
    security(("api_jwt" = []))
)]
pub async fn list_continuations(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Process>>, AppError> {
    let children = app_state.process_service.list_continuations(id).await?;
    Ok(Json(children))
}

// =============================================================================
//  FAVORITOS
// =============================================================================

// PUT /api/processes/{id}/favorite
#[utoipa::path(
    put,
    path = "/api/processes/{id}/favorite",
    tag = "Favorites",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses((status = 204, description = "Processo favoritado")),
    security(("api_jwt" = []))
)]
pub async fn add_favorite(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.process_service.add_favorite(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/processes/{id}/favorite
#[utoipa::path(
    delete,
    path = "/api/processes/{id}/favorite",
    tag = "Favorites",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses((status = 204, description = "Favorito removido")),
    security(("api_jwt" = []))
)]
pub async fn remove_favorite(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.process_service.remove_favorite(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/processes/favorites
#[utoipa::path(
    get,
    path = "/api/processes/favorites",
    tag = "Favorites",
    responses((status = 200, description = "Processos favoritos", body = Vec<ProcessWithCompany>)),
    security(("api_jwt" = []))
)]
pub async fn list_favorites(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<ProcessWithCompany>>, AppError> {
    let favorites = app_state.process_service.list_favorites(user.id).await?;
    Ok(Json(favorites))
}

// =============================================================================
//  TAGS
// =============================================================================

// POST /api/tags
#[utoipa::path(
    post,
    path = "/api/tags",
    tag = "Tags",
    request_body = CreateTagPayload,
    responses(
        (status = 201, description = "Tag criada", body = Tag),
        (status = 409, description = "Nome de tag já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_tag(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTagPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tag = app_state
        .process_service
        .create_tag(&payload.name, &payload.color)
        .await?;

    Ok((StatusCode::CREATED, Json(tag)))
}

// GET /api/tags
#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "Tags",
    responses((status = 200, description = "Lista de tags", body = Vec<Tag>)),
    security(("api_jwt" = []))
)]
pub async fn list_tags(State(app_state): State<AppState>) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = app_state.process_service.list_tags().await?;
    Ok(Json(tags))
}

// DELETE /api/tags/{id}
#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    tag = "Tags",
    params(("id" = Uuid, Path, description = "ID da tag")),
    responses(
        (status = 204, description = "Tag removida"),
        (status = 404, description = "Tag não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_tag(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.process_service.delete_tag(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// PUT /api/processes/{id}/tags/{tag_id}
#[utoipa::path(
    put,
    path = "/api/processes/{id}/tags/{tag_id}",
    tag = "Tags",
    params(
        ("id" = Uuid, Path, description = "ID do processo"),
        ("tag_id" = Uuid, Path, description = "ID da tag")
    ),
    responses((status = 204, description = "Tag vinculada ao processo")),
    security(("api_jwt" = []))
)]
pub async fn attach_tag(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, tag_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    app_state.process_service.attach_tag(id, tag_id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/processes/{id}/tags/{tag_id}
#[utoipa::path(
    delete,
    path = "/api/processes/{id}/tags/{tag_id}",
    tag = "Tags",
    params(
        ("id" = Uuid, Path, description = "ID do processo"),
        ("tag_id" = Uuid, Path, description = "ID da tag")
    ),
    responses((status = 204, description = "Tag desvinculada do processo")),
    security(("api_jwt" = []))
)]
pub async fn detach_tag(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, tag_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    app_state.process_service.detach_tag(id, tag_id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/processes/{id}/tags
#[utoipa::path(
    get,
    path = "/api/processes/{id}/tags",
    tag = "Tags",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses((status = 200, description = "Tags do processo", body = Vec<Tag>)),
    security(("api_jwt" = []))
)]
pub async fn list_process_tags(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = app_state.process_service.list_process_tags(id).await?;
    Ok(Json(tags))
}
