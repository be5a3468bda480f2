//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de error del pipeline de carga y su
//! conversión a respuestas HTTP. El contrato del API es un body
//! `{"detail": "<razón>"}` para todo error; nada escapa al boundary
//! sin traducir.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::dto::upload_dto::ErrorResponse;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Input inválido del cliente: extensión no permitida, archivo
    /// ilegible o intersección de columnas vacía
    #[error("{0}")]
    InvalidInput(String),

    /// Cualquier fallo de la capa del store, incluida la transacción
    /// de reemplazo
    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),

    /// Fallo de I/O durante el staging del archivo
    #[error("Error processing file: {0}")]
    Io(#[from] std::io::Error),

    /// Cualquier fallo no anticipado
    #[error("Error processing file: {0}")]
    Unexpected(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Store(e) => {
                error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Io(e) => {
                error!("I/O error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Unexpected(msg) => {
                error!("Unexpected error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
