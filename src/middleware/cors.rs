//! Middleware de CORS
//!
//! NOTA: Permite cualquier origen - solo para desarrollo

use tower_http::cors::CorsLayer;

/// Crear middleware de CORS configurado para desarrollo
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}
