//! Utilidades del sistema
//!
//! Manejo de errores y staging de archivos subidos.

pub mod errors;
pub mod storage;
