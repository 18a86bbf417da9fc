//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(sqlx::Error::RowNotFound) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) | AppError::Hash(_) | AppError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("❌ {}", self);
        } else {
            warn!("⚠️ {}", self);
        }

        let body = match self {
            AppError::Database(sqlx::Error::RowNotFound) => {
                ErrorResponse::new("Not Found", "Resource not found".to_string(), "NOT_FOUND")
            }
            AppError::Database(e) => ErrorResponse::new(
                "Database Error",
                "An error occurred while accessing the database".to_string(),
                "DB_ERROR",
            )
            .with_details(json!({ "sql_error": e.to_string() })),
            AppError::Validation(e) => ErrorResponse::new(
                "Validation Error",
                "The provided data is invalid".to_string(),
                "VALIDATION_ERROR",
            )
            .with_details(json!(e)),
            AppError::Unauthorized(msg) => ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED"),
            AppError::Forbidden(msg) => ErrorResponse::new("Forbidden", msg, "FORBIDDEN"),
            AppError::NotFound(msg) => ErrorResponse::new("Not Found", msg, "NOT_FOUND"),
            AppError::Conflict(msg) => ErrorResponse::new("Conflict", msg, "CONFLICT"),
            AppError::BadRequest(msg) => ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
            AppError::PayloadTooLarge(msg) => ErrorResponse::new("Payload Too Large", msg, "PAYLOAD_TOO_LARGE"),
            AppError::Internal(msg) => ErrorResponse::new(
                "Internal Server Error",
                "An unexpected error occurred".to_string(),
                "INTERNAL_ERROR",
            )
            .with_details(json!({ "internal_error": msg })),
            AppError::Jwt(msg) => ErrorResponse::new("JWT Error", msg, "JWT_ERROR"),
            AppError::Hash(msg) => ErrorResponse::new(
                "Hash Error",
                "An error occurred while processing credentials".to_string(),
                "HASH_ERROR",
            )
            .with_details(json!({ "hash_error": msg })),
            AppError::Storage(msg) => ErrorResponse::new(
                "Storage Error",
                "An error occurred while accessing file storage".to_string(),
                "STORAGE_ERROR",
            )
            .with_details(json!({ "storage_error": msg })),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {}: {}", operation, reason))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// Traducir violaciones de unicidad de PostgreSQL a 409
pub fn map_unique_violation(err: sqlx::Error, resource: &str, field: &str, value: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            conflict_error(resource, field, value)
        }
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(not_found_error("Vehicle", "1").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(conflict_error("Vehicle", "plate", "ABC1234").status_code(), StatusCode::CONFLICT);
        assert_eq!(validation_error("amount", "must be positive").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(forbidden_error("delete", "admin only").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Database(sqlx::Error::RowNotFound).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            not_found_error("Driver", "abc").to_string(),
            "Not found: Driver with id 'abc' not found"
        );
        assert_eq!(
            bad_request_error("bad").to_string(),
            "Bad request: bad"
        );
    }
}
