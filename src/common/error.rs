// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Rota para onde o painel manda quem não tem sessão
pub const LOGIN_ROUTE: &str = "/auth/login";

// Erros de domínio. Viram resposta HTTP via `to_api_error` (com idioma).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Perfil não encontrado")]
    ProfileNotFound,

    // Papel sem permissão; carrega a rota de volta para o painel
    #[error("Acesso negado (voltar para {0})")]
    Forbidden(&'static str),

    // A chave do catálogo descreve o recurso ("vehicle_not_found", ...)
    #[error("Registro não encontrado: {0}")]
    NotFound(&'static str),

    #[error("Veículo indisponível")]
    VehicleUnavailable,

    #[error("Placa já cadastrada: {0}")]
    RegistrationAlreadyExists(String),

    #[error("Viagem já encerrada")]
    TripAlreadyCompleted,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O que efetivamente sai na resposta
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::ProfileNotFound => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists
            | AppError::VehicleUnavailable
            | AppError::RegistrationAlreadyExists(_)
            | AppError::TripAlreadyCompleted => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Traduz o erro para o idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let status = self.status();

        let (error, details) = match self {
            AppError::ValidationError(errors) => {
                let mut fields = Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            let key = e.message.as_deref().unwrap_or(e.code.as_ref());
                            Value::String(store.translate(lang, key))
                        })
                        .collect();
                    fields.insert(field.to_string(), Value::Array(messages));
                }
                (store.translate(lang, "validation_failed"), Some(Value::Object(fields)))
            }
            AppError::EmailAlreadyExists => (store.translate(lang, "email_already_exists"), None),
            AppError::InvalidCredentials => (store.translate(lang, "invalid_credentials"), None),
            AppError::InvalidToken => (
                store.translate(lang, "invalid_token"),
                Some(json!({ "redirectTo": LOGIN_ROUTE })),
            ),
            AppError::ProfileNotFound => (
                store.translate(lang, "profile_not_found"),
                Some(json!({ "redirectTo": LOGIN_ROUTE })),
            ),
            AppError::Forbidden(fallback) => (
                store.translate(lang, "forbidden"),
                Some(json!({ "redirectTo": fallback })),
            ),
            AppError::NotFound(key) => (store.translate(lang, key), None),
            AppError::VehicleUnavailable => (store.translate(lang, "vehicle_unavailable"), None),
            AppError::RegistrationAlreadyExists(registration) => (
                store.translate_with(lang, "registration_already_exists", &[("value", registration.as_str())]),
                None,
            ),
            AppError::TripAlreadyCompleted => (store.translate(lang, "trip_already_completed"), None),

            // O resto vira 500: detalhe só no log
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (store.translate(lang, "internal_error"), None)
            }
        };

        ApiError { status, error, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    fn store() -> I18nStore {
        I18nStore::load().unwrap()
    }

    fn en() -> Locale {
        Locale("en".into())
    }

    #[test]
    fn forbidden_carries_the_redirect_route() {
        let api = AppError::Forbidden("/dashboard/inventory").to_api_error(&en(), &store());
        assert_eq!(api.status, StatusCode::FORBIDDEN);
        assert_eq!(api.details.unwrap()["redirectTo"], "/dashboard/inventory");
    }

    #[test]
    fn invalid_token_points_to_login() {
        let api = AppError::InvalidToken.to_api_error(&en(), &store());
        assert_eq!(api.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api.details.unwrap()["redirectTo"], LOGIN_ROUTE);
    }

    #[test]
    fn not_found_uses_the_resource_message() {
        let api = AppError::NotFound("vehicle_not_found").to_api_error(&en(), &store());
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "Vehicle not found.");
    }

    #[test]
    fn validation_errors_are_translated_per_field() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("range");
        err.message = Some("must_not_be_negative".into());
        errors.add("quantity", err);

        let api = AppError::ValidationError(errors).to_api_error(&Locale("pt".into()), &store());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details.unwrap()["quantity"][0], "O valor não pode ser negativo.");
    }

    #[test]
    fn internal_errors_hide_the_detail() {
        let api = AppError::InternalServerError(anyhow::anyhow!("pool exhausted"))
            .to_api_error(&en(), &store());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("pool"));
    }

    #[test]
    fn conflicts_map_to_409() {
        assert_eq!(AppError::VehicleUnavailable.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::TripAlreadyCompleted.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::RegistrationAlreadyExists("UAH 123X".into()).status(),
            StatusCode::CONFLICT
        );
    }
}
