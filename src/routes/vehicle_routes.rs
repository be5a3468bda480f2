//! Rutas de lectura de vehículos

use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::vehicle_controller::VehicleController;
use crate::models::vehicle::VehicleResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new().route("/", get(list_vehicles))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}
