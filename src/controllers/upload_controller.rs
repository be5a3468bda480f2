//! Orquestador del pipeline de reemplazo
//!
//! Flujo lineal: validar extensión → staging a disco → decodificar →
//! mapear columnas e intersecar con el schema → normalizar → reemplazo
//! transaccional de la tabla `vehicles`. Cualquier fallo posterior a la
//! apertura de la transacción revierte y deja el contenido previo
//! intacto. El archivo staged se borra al final sin importar el
//! resultado.

use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::dto::upload_dto::UploadResponse;
use crate::models::schema;
use crate::models::vehicle::NewVehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::field_normalizer;
use crate::services::tabular_decoder::{self, DataTable, FileFormat};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::storage;

pub struct UploadController {
    repository: VehicleRepository,
    upload_folder: PathBuf,
}

impl UploadController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: VehicleRepository::new(state),
            upload_folder: state.config.upload_folder.clone(),
        }
    }

    /// Procesar un archivo subido y reemplazar la tabla `vehicles`
    pub async fn upload(&self, filename: &str, bytes: &[u8]) -> Result<UploadResponse, AppError> {
        let format = FileFormat::from_filename(filename).ok_or_else(|| {
            AppError::InvalidInput("Invalid file type. Only .xls, .xlsx, or .csv allowed.".to_string())
        })?;

        info!("📄 Archivo recibido: {} ({} bytes)", filename, bytes.len());

        let staged = storage::stage_upload(&self.upload_folder, format.extension(), bytes).await?;
        let result = self.process_staged(&staged, format).await;

        // Limpieza garantizada en éxito, best effort en fallo
        storage::remove_staged(&staged).await;

        result
    }

    async fn process_staged(
        &self,
        path: &Path,
        format: FileFormat,
    ) -> Result<UploadResponse, AppError> {
        // La decodificación es I/O bloqueante: fuera del runtime async
        let staged_path = path.to_path_buf();
        let mut table = tokio::task::spawn_blocking(move || {
            tabular_decoder::decode(&staged_path, format)
        })
        .await
        .map_err(|e| AppError::Unexpected(format!("decode task panicked: {}", e)))??;

        // Renombrar por el mapeo e intersecar con el schema aceptado
        table.rename_columns(|header| schema::internal_name(header).to_string());
        let common = schema::intersect_with_accepted(&table.columns);
        if common.is_empty() {
            return Err(AppError::InvalidInput(
                "No matching columns found in database".to_string(),
            ));
        }
        table.retain_columns(&common);

        field_normalizer::normalize(&mut table);

        let vehicles = build_rows(&table);
        let inserted = self.repository.replace_all(&vehicles, Utc::now()).await?;
        info!("✅ Carga completada: {} filas reemplazadas", inserted);

        Ok(UploadResponse::overwritten())
    }
}

/// Armar las filas a insertar desde la tabla ya normalizada.
/// `updated_datetime` nunca sale del archivo: lo estampa el repositorio
/// con la hora de procesamiento.
fn build_rows(table: &DataTable) -> Vec<NewVehicle> {
    let field = |row: &[Option<String>], name: &str| -> Option<String> {
        table
            .column_index(name)
            .and_then(|i| row.get(i).cloned().flatten())
    };

    table
        .rows
        .iter()
        .map(|row| NewVehicle {
            active_status: field(row, "active_status"),
            unit_id: field(row, "unit_id"),
            license_plate_no: field(row, "license_plate_no"),
            vin_no: field(row, "vin_no"),
            vehicle_brand_name: field(row, "vehicle_brand_name"),
            vehicle_type: field(row, "type"),
            model: field(row, "model"),
        })
        .collect()
}
