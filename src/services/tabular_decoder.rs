//! Decodificador tabular
//!
//! Convierte el archivo subido (xls/xlsx/csv) en una tabla tipada de
//! filas y columnas. Las primeras `BANNER_ROWS` filas son un banner o
//! leyenda y se saltan incondicionalmente; la fila siguiente es el
//! encabezado. Un archivo que no siga esa convención se va a parsear
//! mal en silencio: es un supuesto documentado del formato, no un caso
//! a detectar.
//!
//! Toda celda se decodifica como string opaco (nunca número), para que
//! valores tipo `unit_id` no sufran coerción ni truncado numérico.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use crate::utils::errors::AppError;

/// Filas de banner previas al encabezado, fijas por convención del formato
pub const BANNER_ROWS: usize = 5;

/// Formato declarado del archivo subido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xls,
    Xlsx,
    Csv,
}

impl FileFormat {
    /// Resolver el formato desde la extensión del archivo (case-insensitive).
    /// `None` si la extensión no está permitida.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = filename.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "xls" => Some(FileFormat::Xls),
            "xlsx" => Some(FileFormat::Xlsx),
            "csv" => Some(FileFormat::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Xls => "xls",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Csv => "csv",
        }
    }
}

/// Tabla decodificada: columnas nombradas y filas de celdas opcionales
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl DataTable {
    /// Índice de una columna por nombre
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Renombrar todas las columnas con la función dada
    pub fn rename_columns<F>(&mut self, rename: F)
    where
        F: Fn(&str) -> String,
    {
        for column in &mut self.columns {
            *column = rename(column);
        }
    }

    /// Quedarse solo con las columnas nombradas, en su orden actual
    pub fn retain_columns(&mut self, keep: &[String]) {
        let indices: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| keep.contains(c))
            .map(|(i, _)| i)
            .collect();

        self.columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        for row in &mut self.rows {
            *row = indices
                .iter()
                .map(|&i| row.get(i).cloned().flatten())
                .collect();
        }
    }

    /// Valor de una celda por fila y nombre de columna
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }
}

/// Decodificar el archivo staged según su formato declarado.
/// Un stream malformado para el formato es error del cliente.
pub fn decode(path: &Path, format: FileFormat) -> Result<DataTable, AppError> {
    match format {
        FileFormat::Xls | FileFormat::Xlsx => decode_workbook(path),
        FileFormat::Csv => decode_csv(path),
    }
}

/// Decodificar xls/xlsx con calamine, primera hoja del workbook
fn decode_workbook(path: &Path) -> Result<DataTable, AppError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        AppError::InvalidInput(format!("Error reading Excel file. Ensure it's a valid file: {}", e))
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::InvalidInput("Excel file has no worksheets".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        AppError::InvalidInput(format!("Error reading Excel file. Ensure it's a valid file: {}", e))
    })?;

    let mut rows = range.rows().skip(BANNER_ROWS);

    let columns: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(header_cell_to_string).collect(),
        None => return Ok(DataTable::default()),
    };

    let data_rows: Vec<Vec<Option<String>>> = rows
        .map(|row| {
            let mut cells: Vec<Option<String>> = row.iter().map(cell_to_string).collect();
            cells.resize(columns.len(), None);
            cells
        })
        .collect();

    Ok(DataTable {
        columns,
        rows: data_rows,
    })
}

/// Decodificar csv con el crate csv, sin interpretación de encabezados
/// propia: el banner y el encabezado se resuelven aquí
fn decode_csv(path: &Path) -> Result<DataTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::InvalidInput(format!("Error reading CSV file: {}", e)))?;

    let mut records = reader.records().skip(BANNER_ROWS);

    let columns: Vec<String> = match records.next() {
        Some(header) => {
            let header =
                header.map_err(|e| AppError::InvalidInput(format!("Error reading CSV file: {}", e)))?;
            header.iter().map(|c| c.to_string()).collect()
        }
        None => return Ok(DataTable::default()),
    };

    let mut data_rows = Vec::new();
    for record in records {
        let record =
            record.map_err(|e| AppError::InvalidInput(format!("Error reading CSV file: {}", e)))?;
        let mut cells: Vec<Option<String>> = record
            .iter()
            .map(|c| {
                if c.is_empty() {
                    None
                } else {
                    Some(c.to_string())
                }
            })
            .collect();
        cells.resize(columns.len(), None);
        data_rows.push(cells);
    }

    Ok(DataTable {
        columns,
        rows: data_rows,
    })
}

/// Celda de encabezado: siempre string, vacío si no es texto usable
fn header_cell_to_string(cell: &Data) -> String {
    cell_to_string(cell).unwrap_or_default()
}

/// Convertir una celda a string opaco. Los floats enteros se formatean
/// sin `.0` para no corromper identificadores con pinta numérica.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format!("{}", dt)),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
        Data::Error(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const BANNER: &str = "banner 1,,\nbanner 2,,\nbanner 3,,\nbanner 4,,\nbanner 5,,\n";

    #[test]
    fn test_formato_desde_extension() {
        assert_eq!(FileFormat::from_filename("data.csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_filename("DATA.XLSX"), Some(FileFormat::Xlsx));
        assert_eq!(FileFormat::from_filename("flota.xls"), Some(FileFormat::Xls));
        assert_eq!(FileFormat::from_filename("data.txt"), None);
        assert_eq!(FileFormat::from_filename("sin_extension"), None);
    }

    #[test]
    fn test_csv_salta_banner_y_lee_encabezado() {
        let csv = format!(
            "{}UNIT ID,หมายเลขทะเบียน,แบบ/รุ่น GPS\n0012345,กข-1234,GT06N\n67890,คง-5678,TK103\n",
            BANNER
        );
        let file = write_temp_csv(&csv);
        let table = decode(file.path(), FileFormat::Csv).unwrap();

        assert_eq!(
            table.columns,
            vec!["UNIT ID", "หมายเลขทะเบียน", "แบบ/รุ่น GPS"]
        );
        assert_eq!(table.rows.len(), 2);
        // Identificador con cero a la izquierda se conserva como string
        assert_eq!(table.cell(0, "UNIT ID"), Some("0012345"));
        assert_eq!(table.cell(1, "UNIT ID"), Some("67890"));
    }

    #[test]
    fn test_csv_celdas_vacias_son_none() {
        let csv = format!("{}UNIT ID,แบบ/รุ่น GPS\n111,\n", BANNER);
        let file = write_temp_csv(&csv);
        let table = decode(file.path(), FileFormat::Csv).unwrap();
        assert_eq!(table.cell(0, "แบบ/รุ่น GPS"), None);
    }

    #[test]
    fn test_csv_filas_cortas_se_rellenan() {
        let csv = format!("{}a,b,c\n1,2\n", BANNER);
        let file = write_temp_csv(&csv);
        let table = decode(file.path(), FileFormat::Csv).unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], None);
    }

    #[test]
    fn test_csv_sin_filas_tras_banner() {
        let file = write_temp_csv("solo,banner\n1,2\n");
        let table = decode(file.path(), FileFormat::Csv).unwrap();
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_celda_float_entero_sin_punto_decimal() {
        // calamine entrega celdas numéricas como Float: un identificador
        // con pinta numérica debe quedar como string sin `.0`
        assert_eq!(cell_to_string(&Data::Float(12345.0)), Some("12345".to_string()));
        assert_eq!(cell_to_string(&Data::Float(0.0)), Some("0".to_string()));
    }

    #[test]
    fn test_celda_float_fraccionario_conserva_decimales() {
        assert_eq!(cell_to_string(&Data::Float(1.5)), Some("1.5".to_string()));
    }

    #[test]
    fn test_celdas_no_numericas() {
        assert_eq!(cell_to_string(&Data::Empty), None);
        assert_eq!(cell_to_string(&Data::String(String::new())), None);
        assert_eq!(
            cell_to_string(&Data::String("0012345".to_string())),
            Some("0012345".to_string())
        );
        assert_eq!(cell_to_string(&Data::Int(67890)), Some("67890".to_string()));
        assert_eq!(cell_to_string(&Data::Bool(true)), Some("true".to_string()));
    }

    #[test]
    fn test_xlsx_malformado_es_error_de_cliente() {
        let mut file = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .unwrap();
        file.write_all(b"esto no es un workbook").unwrap();
        let result = decode(file.path(), FileFormat::Xlsx);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_retain_columns() {
        let mut table = DataTable {
            columns: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            rows: vec![vec![
                Some("1".to_string()),
                Some("2".to_string()),
                Some("3".to_string()),
            ]],
        };
        table.retain_columns(&["a".to_string(), "c".to_string()]);
        assert_eq!(table.columns, vec!["a", "c"]);
        assert_eq!(
            table.rows[0],
            vec![Some("1".to_string()), Some("3".to_string())]
        );
    }

    #[test]
    fn test_rename_columns() {
        let mut table = DataTable {
            columns: vec!["UNIT ID".to_string()],
            rows: vec![],
        };
        table.rename_columns(|c| crate::models::schema::internal_name(c).to_string());
        assert_eq!(table.columns, vec!["unit_id"]);
    }
}
