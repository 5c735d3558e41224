use super::utils::build_table;
use crate::error::AppError;
use crate::models::{CellValue, Table};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Loads the first worksheet of an `.xlsx`/`.xls` workbook.
///
/// The workbook (and its file handle) is dropped before the table is built.
/// A blank cell reads as `""` in a text column and as null in a numeric or
/// boolean one.
pub fn load_workbook(path: &Path) -> Result<Table, AppError> {
    let rows: Vec<Vec<Data>> = {
        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names().to_vec();
        tracing::debug!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::FileProcessingError("No sheets found in workbook".to_string()))?
            .map_err(|e| AppError::FileProcessingError(format!("Failed to read worksheet: {}", e)))?;

        let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
        rows
    };

    let Some(header_row) = rows.first() else {
        return Err(AppError::FileProcessingError(format!(
            "First worksheet of {} is empty",
            path.display()
        )));
    };

    let headers: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();
    let body: Vec<Vec<CellValue>> = rows
        .iter()
        .skip(1)
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    build_table(&headers, &body)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Text(String::new()),
        Data::Error(_) => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        other => CellValue::Text(other.to_string()),
    }
}
