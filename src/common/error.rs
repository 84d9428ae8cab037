use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada handler devolve Result<_, AppError>; o IntoResponse abaixo decide o status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("CNPJ já cadastrado")]
    CnpjAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    // A regra de ouro do checklist: o item anterior precisa estar concluído.
    #[error("Etapa anterior do checklist pendente")]
    ChecklistOrder,

    // Avançar processo finalizado, retornar no índice zero, etc.
    #[error("Transição de fluxo inválida: {0}")]
    WorkflowViolation(&'static str),

    #[error("Conflito de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Converte violação de chave única do Postgres na variante de domínio.
    pub fn from_unique_violation(err: sqlx::Error, fallback: AppError) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return fallback;
            }
        }
        err.into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string()),
            AppError::CnpjAlreadyExists => (StatusCode::CONFLICT, "Este CNPJ já está cadastrado.".to_string()),
            AppError::UniqueConstraintViolation(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente.".to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Você não tem permissão para esta ação.".to_string()),
            AppError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{} não encontrado.", entity)),
            AppError::ChecklistOrder => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "A etapa anterior do checklist ainda não foi concluída.".to_string(),
            ),
            AppError::WorkflowViolation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.to_string()),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn cnpj_duplicado_vira_conflict() {
        let resp = AppError::CnpjAlreadyExists.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn quebra_de_ordem_do_checklist_vira_422() {
        let resp = AppError::ChecklistOrder.into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn erro_de_banco_vira_500() {
        let resp = AppError::DatabaseError(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
