//! DTOs del endpoint de carga

use serde::{Deserialize, Serialize};

/// Response de carga exitosa
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

impl UploadResponse {
    pub fn overwritten() -> Self {
        Self {
            message: "File uploaded, and data overwritten successfully".to_string(),
        }
    }
}

/// Response de error: body `{"detail": ...}` según el contrato del API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
