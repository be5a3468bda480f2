//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un valor por defecto pensado para el despliegue con SQLite local.

use std::env;
use std::path::PathBuf;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub database_url: String,
    pub upload_folder: PathBuf,
    pub host: String,
    pub port: u16,
}

impl EnvironmentConfig {
    /// Leer la configuración desde el entorno, con defaults
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://vehicle.db?mode=rwc".to_string()),
            upload_folder: env::var("UPLOAD_FOLDER")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
        }
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_sin_entorno() {
        let config = EnvironmentConfig {
            database_url: "sqlite://vehicle.db?mode=rwc".to_string(),
            upload_folder: "uploads".into(),
            host: "0.0.0.0".to_string(),
            port: 3000,
        };
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }
}
