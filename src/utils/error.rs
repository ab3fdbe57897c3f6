use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::utils::response;
use crate::validation::FieldViolation;

/// Every business-rule failure is mapped to one of these kinds at the
/// operation boundary. `NotFound` deliberately covers absent, soft-deleted
/// and out-of-scope records alike, so callers cannot enumerate records
/// they do not own.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Errores de validación")]
    Validation(Vec<FieldViolation>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Error de base de datos")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::Database(e) => error!(error = ?e, "Error de base de datos"),
            AppError::Internal(msg) => error!(message = %msg, "Error interno"),
            AppError::Unauthorized(msg) | AppError::Forbidden(msg) => {
                warn!(message = %msg, "Acceso rechazado");
            }
            _ => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        match self {
            AppError::Validation(violaciones) => {
                let mensajes: Vec<String> =
                    violaciones.into_iter().map(|v| v.mensaje).collect();
                let message = mensajes.join(", ");
                response::error(status, message, Some(mensajes))
            }
            // Internal detail stays in the logs; clients get a fixed message.
            AppError::Database(_) | AppError::Internal(_) => {
                response::error(status, "Error interno del servidor", None)
            }
            otro => response::error(status, otro.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codigos_de_estado_por_tipo() {
        assert_eq!(
            AppError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
