use super::utils::build_table;
use super::LoaderOptions;
use crate::error::AppError;
use crate::models::{CellValue, Table};
use std::path::Path;

pub fn load_delimited(path: &Path, options: &LoaderOptions) -> Result<Table, AppError> {
    tracing::debug!("Reading delimited file {}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(AppError::FileProcessingError(format!(
            "No header row found in {}",
            path.display()
        )));
    }

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        raw_rows.push(
            record
                .iter()
                .map(|field| {
                    if options.is_null_marker(field) {
                        None
                    } else {
                        Some(field.to_string())
                    }
                })
                .collect(),
        );
    }
    tracing::debug!("Read {} rows x {} columns", raw_rows.len(), headers.len());

    let typed = type_columns(&raw_rows, headers.len());
    build_table(&headers, &typed)
}

/// Converts raw fields to typed cells, one column at a time.
///
/// A column whose non-empty fields all parse as numbers is numeric and its
/// empty fields become nulls. Likewise for `true`/`false` columns. In text
/// columns an empty field stays an empty string.
fn type_columns(raw_rows: &[Vec<Option<String>>], width: usize) -> Vec<Vec<CellValue>> {
    let mut rows: Vec<Vec<CellValue>> = raw_rows
        .iter()
        .map(|row| vec![CellValue::Null; row.len()])
        .collect();

    for col_idx in 0..width.max(raw_rows.iter().map(Vec::len).max().unwrap_or(0)) {
        let fields = || {
            raw_rows
                .iter()
                .filter_map(move |row| row.get(col_idx).and_then(|f| f.as_deref()))
                .filter(|f| !f.is_empty())
        };

        let has_values = fields().next().is_some();
        let numeric = has_values && fields().all(|f| parse_number(f).is_some());
        let boolean = has_values && !numeric && fields().all(|f| parse_bool(f).is_some());

        for (row_idx, row) in raw_rows.iter().enumerate() {
            let Some(field) = row.get(col_idx) else {
                continue;
            };
            rows[row_idx][col_idx] = match field.as_deref() {
                None => CellValue::Null,
                Some("") if numeric || boolean => CellValue::Null,
                Some(f) if numeric => parse_number(f).map_or(CellValue::Null, CellValue::Number),
                Some(f) if boolean => parse_bool(f).map_or(CellValue::Null, CellValue::Boolean),
                Some(f) => CellValue::Text(f.to_string()),
            };
        }
    }

    rows
}

fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}

fn parse_bool(field: &str) -> Option<bool> {
    match field.trim() {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}
