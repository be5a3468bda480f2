//! Módulo de base de datos
//!
//! Maneja la conexión con SQLite vía SQLx.

pub mod connection;

pub use connection::DatabaseConnection;
