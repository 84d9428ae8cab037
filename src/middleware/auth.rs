use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{common::error::AppError, config::AppState, models::auth::User};

// Nome do cookie onde o token viaja. O login o grava; o guard o lê.
pub const TOKEN_COOKIE: &str = "token";

/// Extrai o token do cabeçalho `Authorization: Bearer ...` ou, na falta
/// dele, do cookie `token` (o frontend usa cookie; integrações usam header).
fn extract_token(parts_headers: &axum::http::HeaderMap, jar: &CookieJar) -> Option<String> {
    if let Some(auth_header) = parts_headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            return Some(token.to_owned());
        }
    }

    jar.get(TOKEN_COOKIE).map(|cookie| cookie.value().to_owned())
}

// O middleware de autenticação: valida o JWT e injeta o usuário na request.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers(), &jar).ok_or(AppError::InvalidToken)?;

    let user = app_state.auth_service.validate_token(&token).await?;

    // Insere o usuário nos "extensions" da requisição
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

// Guard adicional para rotas de administração. Aplicado DEPOIS do auth_guard.
pub async fn admin_guard(
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<User>()
        .ok_or(AppError::InvalidToken)?;

    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}
