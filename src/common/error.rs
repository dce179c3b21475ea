// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Toda resposta de erro segue o envelope JSON { "message": .., "type": .. }.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("Status de OS inválido: {0}")]
    InvalidStatus(i16),

    #[error("Intervalo de datas inválido")]
    InvalidDateRange,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // A transação estourou o tempo limite; o cliente pode tentar de novo.
    #[error("Tempo limite da transação excedido")]
    TransactionTimeout,

    #[error("Operação não suportada")]
    UnsupportedOperation,

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
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
                    "message": "Um ou mais campos são inválidos.",
                    "type": "ValidationError",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, "NotFound", message),
            AppError::InvalidStatus(id) => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                format!("Status de OS inválido: {id}."),
            ),
            AppError::InvalidDateRange => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "Intervalo de datas inválido: início depois do fim.".to_string(),
            ),
            AppError::TransactionTimeout => (
                StatusCode::SERVICE_UNAVAILABLE,
                "DatabaseError",
                "A operação excedeu o tempo limite. Tente novamente.".to_string(),
            ),
            AppError::UnsupportedOperation => (
                StatusCode::BAD_REQUEST,
                "UnsupportedOperation",
                "Operação não suportada.".to_string(),
            ),
            // DatabaseError e InternalServerError viram 500 genérico.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DatabaseError",
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "message": message, "type": kind }));
        (status, body).into_response()
    }
}
