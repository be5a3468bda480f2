//! Registro de schema de la tabla `vehicles`
//!
//! Datos puros: el mapeo de encabezados externos (localizados) a nombres
//! internos de columna, y el conjunto de columnas que acepta el store.
//! Agregar una variante de encabezado nuevo es agregar una entrada aquí;
//! el pipeline no cambia.
//!
//! El match de encabezados es por igualdad exacta de strings (sin
//! normalizar espacios ni mayúsculas): un encabezado que derive en el
//! archivo fuente simplemente queda fuera de la intersección.

use lazy_static::lazy_static;
use std::collections::HashSet;

/// Mapeo ordenado encabezado externo -> columna interna
pub const COLUMN_MAPPING: &[(&str, &str)] = &[
    ("สถานะ", "active_status"),
    ("UNIT ID", "unit_id"),
    ("หมายเลขทะเบียน", "license_plate_no"),
    ("หมายเลขตัวถัง", "vin_no"),
    ("ชนิดรถ (ยี่ห้อรถ)", "vehicle_brand_name"),
    ("ชนิดการจดทะเบียน", "type"),
    ("แบบ/รุ่น GPS", "model"),
    ("วันที่แก้ไขข้อมูลล่าสุด", "updated_datetime"),
];

lazy_static! {
    /// Columnas que acepta la tabla `vehicles`
    pub static ref ACCEPTED_FIELDS: HashSet<&'static str> = [
        "id",
        "active_status",
        "unit_id",
        "license_plate_no",
        "vin_no",
        "vehicle_brand_name",
        "type",
        "model",
        "updated_datetime",
    ]
    .into_iter()
    .collect();
}

/// Traducir un encabezado externo a su nombre interno.
/// Un encabezado sin entrada en el mapeo pasa tal cual.
pub fn internal_name(header: &str) -> &str {
    COLUMN_MAPPING
        .iter()
        .find(|(external, _)| *external == header)
        .map(|(_, internal)| *internal)
        .unwrap_or(header)
}

/// Intersección explícita entre las columnas decodificadas (ya mapeadas)
/// y el conjunto aceptado por el store
pub fn intersect_with_accepted(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|c| ACCEPTED_FIELDS.contains(c.as_str()))
        .cloned()
        .collect()
}
