//! Repositorio de la tabla `vehicles`
//!
//! Dueño del ciclo de vida de la transacción delete-all + bulk insert.
//! El lock de escritura compartido serializa los reemplazos: como
//! máximo una transacción de reemplazo corre a la vez; las lecturas
//! siguen pasando por el pool con el aislamiento normal del store.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: SqlitePool,
    replace_lock: Arc<Mutex<()>>,
}

impl VehicleRepository {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            replace_lock: state.replace_lock.clone(),
        }
    }

    #[cfg(test)]
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            replace_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Crear la tabla `vehicles` si no existe (DDL de arranque)
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vehicles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                active_status TEXT NOT NULL DEFAULT 'A',
                unit_id TEXT NOT NULL UNIQUE,
                license_plate_no TEXT NOT NULL,
                vin_no TEXT NOT NULL,
                vehicle_brand_name TEXT NOT NULL,
                type TEXT,
                model TEXT NOT NULL,
                updated_datetime TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reemplazo total: borrar todas las filas existentes e insertar las
    /// nuevas, dentro de una sola transacción. Cualquier fallo (por
    /// ejemplo un NULL en columna NOT NULL) revierte todo y deja el
    /// contenido previo intacto.
    pub async fn replace_all(
        &self,
        vehicles: &[NewVehicle],
        processed_at: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let _guard = self.replace_lock.lock().await;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM vehicles").execute(&mut *tx).await?;

        let mut inserted = 0u64;
        for vehicle in vehicles {
            sqlx::query(
                r#"
                INSERT INTO vehicles
                    (active_status, unit_id, license_plate_no, vin_no, vehicle_brand_name, type, model, updated_datetime)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(vehicle.active_status.as_deref().unwrap_or("A"))
            .bind(&vehicle.unit_id)
            .bind(&vehicle.license_plate_no)
            .bind(&vehicle.vin_no)
            .bind(&vehicle.vehicle_brand_name)
            .bind(&vehicle.vehicle_type)
            .bind(&vehicle.model)
            .bind(processed_at)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }

        tx.commit().await?;

        info!("💾 Tabla vehicles reemplazada: {} filas", inserted);
        Ok(inserted)
    }

    /// Listar todos los vehículos almacenados
    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(vehicles)
    }

    /// Cantidad de filas en la tabla
    pub async fn count(&self) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}
