mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::cors_middleware;
use repositories::vehicle_repository::VehicleRepository;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚛 Fleet Upload API - Carga masiva de vehículos");
    info!("===============================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&config.database_url).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Crear el schema de la tabla vehicles si no existe
    let app_state = AppState::new(pool, config.clone());
    VehicleRepository::new(&app_state).ensure_schema().await?;
    info!("✅ Tabla 'vehicles' lista");

    // Crear el directorio de staging para los archivos subidos
    utils::storage::ensure_upload_dir(&config.upload_folder).await?;
    info!("✅ Directorio de staging: {}", config.upload_folder.display());

    // Crear router de la API
    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/upload/", routes::upload_routes::create_upload_router())
        .nest("/vehicles/", routes::vehicle_routes::create_vehicle_router())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /upload/ - Subir archivo xls/xlsx/csv y reemplazar la tabla vehicles");
    info!("   GET  /vehicles/ - Listar los vehículos almacenados");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-upload",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
