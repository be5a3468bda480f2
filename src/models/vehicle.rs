//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes. Mapea
//! exactamente al schema de la tabla `vehicles` con primary key `id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estado del vehículo - códigos persistidos en `active_status`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActiveStatus {
    Active,
    Inactive,
}

impl ActiveStatus {
    /// Código de una letra almacenado en la base de datos
    pub fn as_code(&self) -> &'static str {
        match self {
            ActiveStatus::Active => "A",
            ActiveStatus::Inactive => "D",
        }
    }

    /// Mapear el token de estado del archivo fuente (tailandés).
    /// Un token no reconocido queda sin estado; el insert aplica el
    /// default `A`.
    pub fn from_source_token(token: &str) -> Option<Self> {
        match token.trim() {
            "ใช้งาน" => Some(ActiveStatus::Active),
            "ไม่ใช้งาน" => Some(ActiveStatus::Inactive),
            _ => None,
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub active_status: String,
    pub unit_id: String,
    pub license_plate_no: String,
    pub vin_no: String,
    pub vehicle_brand_name: String,
    #[sqlx(rename = "type")]
    pub vehicle_type: Option<String>,
    pub model: String,
    pub updated_datetime: DateTime<Utc>,
}

/// Fila nueva construida por el pipeline de carga, previa al insert.
/// Los campos opcionales que sean NOT NULL en destino hacen fallar la
/// transacción completa si llegan vacíos.
#[derive(Debug, Clone, Default)]
pub struct NewVehicle {
    pub active_status: Option<String>,
    pub unit_id: Option<String>,
    pub license_plate_no: Option<String>,
    pub vin_no: Option<String>,
    pub vehicle_brand_name: Option<String>,
    pub vehicle_type: Option<String>,
    pub model: Option<String>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i64,
    pub active_status: String,
    pub unit_id: String,
    pub license_plate_no: String,
    pub vin_no: String,
    pub vehicle_brand_name: String,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub model: String,
    pub updated_datetime: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            active_status: vehicle.active_status,
            unit_id: vehicle.unit_id,
            license_plate_no: vehicle.license_plate_no,
            vin_no: vehicle.vin_no,
            vehicle_brand_name: vehicle.vehicle_brand_name,
            vehicle_type: vehicle.vehicle_type,
            model: vehicle.model,
            updated_datetime: vehicle.updated_datetime.to_rfc3339(),
        }
    }
}
