// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// El tipo de error del dominio. Solo existen tres clases recuperables
// (NotFound / Conflict / Validation); todo lo demás es infraestructura.
#[derive(Debug, Error)]
pub enum AppError {
    // La entidad referenciada no existe (por id, código, RUC o relación)
    #[error("{0}")]
    NotFound(String),

    // Se violaría una invariante de unicidad o de transición de estado
    #[error("{0}")]
    Conflict(String),

    // Entrada bien formada pero semánticamente inválida (horarios de negocio)
    #[error("{0}")]
    Validation(String),

    // Errores sintácticos del payload, detectados por `validator` en el adaptador
    #[error("Error de validación")]
    InvalidPayload(#[from] validator::ValidationErrors),

    // Fallas de la base de datos que no son violaciones de unicidad
    #[error("Error de base de datos")]
    Database(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado
    #[error("Error interno del servidor")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),

            // Devuelve todos los detalles de la validación de campos.
            AppError::InvalidPayload(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Todo lo demás (Database, Internal) se convierte en 500.
            // `tracing` registra el detalle que `thiserror` nos da.
            ref e => {
                tracing::error!("Error interno del servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
