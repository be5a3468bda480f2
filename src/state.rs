//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El lock de escritura serializa las
//! transacciones de reemplazo: como máximo una a la vez.

use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: EnvironmentConfig,
    pub replace_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: EnvironmentConfig) -> Self {
        Self {
            pool,
            config,
            replace_lock: Arc::new(Mutex::new(())),
        }
    }
}
