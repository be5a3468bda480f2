//! Controller de lectura de vehículos

use crate::models::vehicle::VehicleResponse;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: VehicleRepository::new(state),
        }
    }

    /// Listar el contenido completo de la tabla `vehicles`
    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_all().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }
}
