//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema de la tabla `vehicles`, más el registro de columnas.

pub mod schema;
pub mod vehicle;
