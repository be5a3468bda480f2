//! Normalizador de campos
//!
//! Reglas de limpieza por columna, aplicadas después de la intersección
//! con el schema. La normalización nunca hace fallar la request: un
//! valor no interpretable pasa como string o queda sin valor; solo los
//! fallos estructurales (columna NOT NULL ausente) emergen después, en
//! el insert.

use crate::models::vehicle::ActiveStatus;
use crate::services::tabular_decoder::DataTable;

/// Aplicar las reglas de normalización in place, solo sobre las
/// columnas presentes en la tabla
pub fn normalize(table: &mut DataTable) {
    if let Some(idx) = table.column_index("active_status") {
        for row in &mut table.rows {
            if let Some(cell) = row.get_mut(idx) {
                *cell = cell
                    .as_deref()
                    .and_then(ActiveStatus::from_source_token)
                    .map(|status| status.as_code().to_string());
            }
        }
    }

    if let Some(idx) = table.column_index("unit_id") {
        for row in &mut table.rows {
            if let Some(cell) = row.get_mut(idx) {
                *cell = cell.as_deref().map(clean_unit_id);
            }
        }
    }
}

/// Limpiar un unit_id: trim y desarmado del wrapper `="..."` que
/// algunos exports de hoja de cálculo agregan a strings numéricos
fn clean_unit_id(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.starts_with("=\"") && trimmed.ends_with('"') && trimmed.len() >= 3 {
        trimmed[2..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}
