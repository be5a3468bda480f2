//! Configuración de base de datos
//!
//! Este módulo maneja la conexión y configuración de SQLite con SQLx.
//! La URI es configurable (DATABASE_URL); el despliegue por defecto usa
//! un archivo SQLite local.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            max_connections: 10,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
        }
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<SqlitePool, sqlx::Error> {
        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .connect(&self.url)
            .await
    }

    /// Crear un pool en memoria para testing
    pub async fn create_test_pool() -> Result<SqlitePool, sqlx::Error> {
        // Una sola conexión: cada conexión ':memory:' es una base distinta
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
    }
}
