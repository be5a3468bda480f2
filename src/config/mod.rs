//! Configuración del sistema
//!
//! Variables de entorno y configuración de la base de datos.

pub mod database;
pub mod environment;
