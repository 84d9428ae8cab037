use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::questionnaire::{CreateQuestionnairePayload, QuestionnaireResponse},
};

// POST /api/processes/{id}/questionnaire
#[utoipa::path(
    post,
    path = "/api/processes/{id}/questionnaire",
    tag = "Questionnaires",
    request_body = CreateQuestionnairePayload,
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 201, description = "Respostas registradas", body = QuestionnaireResponse),
        (status = 422, description = "Respostas inválidas ou departamento fora do fluxo")
    ),
    security(("api_jwt" = []))
)]
pub async fn submit_questionnaire(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateQuestionnairePayload>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state
        .questionnaire_service
        .submit(id, payload.department_id, payload.answers, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

// GET /api/processes/{id}/questionnaire
#[utoipa::path(
    get,
    path = "/api/processes/{id}/questionnaire",
    tag = "Questionnaires",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses((status = 200, description = "Respostas do processo", body = Vec<QuestionnaireResponse>)),
    security(("api_jwt" = []))
)]
pub async fn list_questionnaire_responses(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<QuestionnaireResponse>>, AppError> {
    let responses = app_state.questionnaire_service.list(id).await?;
    Ok(Json(responses))
}
