// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Os textos visíveis pela API fazem parte do contrato com o front-end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Cabeçalho de autorização ausente")]
    MissingToken,

    #[error("Token inválido ou expirado")]
    InvalidToken,

    // E-mail verificado pelo provedor, mas sem conta cadastrada aqui.
    #[error("Conta não cadastrada")]
    AccountNotRegistered,

    #[error("Acesso negado")]
    AccessDenied,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Slot não encontrado")]
    SlotNotFound,

    #[error("Disponibilidade não encontrada")]
    AvailabilityNotFound,

    #[error("E-mail ou matrícula já cadastrados")]
    EmailOrIdNumberTaken,

    #[error("Slot já reservado")]
    SlotAlreadyBooked,

    #[error("Disponibilidade já aprovada")]
    AvailabilityAlreadyApproved,

    #[error("Papel inválido: {0}")]
    InvalidRole(String),

    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Retorna todos os detalhes da validação.
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
                    "message": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::MissingToken => {
                (StatusCode::UNAUTHORIZED, "Unauthorized. Missing header.".to_string())
            }
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::AccountNotRegistered => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::AccessDenied => (StatusCode::FORBIDDEN, "Access denied".to_string()),

            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            AppError::SlotNotFound => (StatusCode::NOT_FOUND, "Slot not found".to_string()),
            AppError::AvailabilityNotFound => {
                (StatusCode::NOT_FOUND, "Availability not found".to_string())
            }

            AppError::EmailOrIdNumberTaken => (
                StatusCode::BAD_REQUEST,
                "Email or ID Number already exists".to_string(),
            ),
            AppError::SlotAlreadyBooked => {
                (StatusCode::BAD_REQUEST, "Slot already booked".to_string())
            }
            AppError::AvailabilityAlreadyApproved => (
                StatusCode::BAD_REQUEST,
                "Availability already approved".to_string(),
            ),
            AppError::InvalidRole(role) => (
                StatusCode::BAD_REQUEST,
                format!("Role must be 'Student', 'Tutor' or 'Admin', got '{role}'."),
            ),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),

            // DatabaseError e InternalServerError viram 500 com mensagem
            // genérica; o detalhe fica só no log do servidor.
            ref e => {
                tracing::error!("Erro interno do servidor: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}
