//! Servicios del pipeline de carga
//!
//! Decodificación tabular y normalización de campos.

pub mod field_normalizer;
pub mod tabular_decoder;
