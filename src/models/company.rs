use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Empresa: a "dona" de cada processo que percorre os departamentos.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,

    // CNPJ é único no banco; duplicidade vira 409.
    pub cnpj: String,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: String,

    #[validate(length(min = 14, max = 18, message = "CNPJ inválido."))]
    pub cnpj: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: Option<String>,

    #[validate(length(min = 14, max = 18, message = "CNPJ inválido."))]
    pub cnpj: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cnpj_curto_e_rejeitado() {
        let payload = CreateCompanyPayload {
            name: "ACME Ltda".into(),
            cnpj: "123".into(),
            email: None,
            phone: None,
            city: None,
        };

        let errors = payload.validate().expect_err("deveria falhar");
        assert!(errors.field_errors().contains_key("cnpj"));
    }

    #[test]
    fn cnpj_formatado_passa() {
        let payload = CreateCompanyPayload {
            name: "ACME Ltda".into(),
            cnpj: "12.345.678/0001-90".into(),
            email: Some("contato@acme.com.br".into()),
            phone: None,
            city: None,
        };

        assert!(payload.validate().is_ok());
    }
}
