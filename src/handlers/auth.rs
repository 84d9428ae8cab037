use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, TOKEN_COOKIE},
    models::auth::{AuthResponse, LoginUserPayload, RegisterUserPayload, UpdateRolePayload, User},
};

/// O token também viaja como cookie httpOnly, que é o que o auth_guard lê
/// quando o header Authorization não vem.
fn token_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token.to_owned()))
        .path("/")
        .http_only(true)
        .build()
}

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário registrado", body = AuthResponse),
        (status = 409, description = "E-mail já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .register_user(&payload.name, &payload.email, &payload.password)
        .await?;

    let jar = jar.add(token_cookie(&token));

    Ok((StatusCode::CREATED, jar, Json(AuthResponse { token })))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    let jar = jar.add(token_cookie(&token));

    Ok((jar, Json(AuthResponse { token })))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses((status = 200, description = "Usuário autenticado", body = User)),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

// GET /api/users (admin)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "Lista de usuários", body = Vec<User>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = app_state.user_repo.list_users(&app_state.db_pool).await?;
    Ok(Json(users))
}

// PATCH /api/users/{id}/role (admin)
#[utoipa::path(
    patch,
    path = "/api/users/{id}/role",
    tag = "Users",
    request_body = UpdateRolePayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Papel atualizado", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user_role(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<Json<User>, AppError> {
    let user = app_state
        .user_repo
        .update_role(&app_state.db_pool, id, payload.role)
        .await?;

    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_de_token_usa_o_nome_que_o_guard_le() {
        let cookie = token_cookie("abc.def.ghi");

        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.value(), "abc.def.ghi");
    }

    #[test]
    fn cookie_de_token_e_httponly_no_caminho_raiz() {
        let cookie = token_cookie("abc.def.ghi");

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn cookie_emitido_e_recuperavel_pelo_jar() {
        let jar = CookieJar::new().add(token_cookie("abc.def.ghi"));

        assert_eq!(
            jar.get(TOKEN_COOKIE).map(|c| c.value().to_owned()),
            Some("abc.def.ghi".to_owned())
        );
    }
}
