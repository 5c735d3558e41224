use crate::error::AppError;
use crate::models::{CellValue, Column, Table};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Boolean,
    Text,
}

/// Classifies a column from its non-blank cells.
///
/// Columns holding only blanks, or a mix of kinds, are text.
pub fn detect_column_kind(values: &[CellValue]) -> ColumnKind {
    let mut numeric_count = 0;
    let mut bool_count = 0;
    let mut total_count = 0;

    for value in values.iter().filter(|v| !v.is_blank()) {
        total_count += 1;
        match value {
            CellValue::Number(_) => numeric_count += 1,
            CellValue::Boolean(_) => bool_count += 1,
            _ => {}
        }
    }

    match () {
        _ if total_count == 0 => ColumnKind::Text,
        _ if numeric_count == total_count => ColumnKind::Numeric,
        _ if bool_count == total_count => ColumnKind::Boolean,
        _ => ColumnKind::Text,
    }
}

/// Turns empty text cells into nulls when the rest of the column is numeric
/// or boolean. Text and mixed columns keep `""` so it can be whitelisted.
pub fn settle_blank_cells(values: &mut [CellValue]) {
    if detect_column_kind(values) == ColumnKind::Text {
        return;
    }
    for value in values.iter_mut().filter(|v| v.is_blank()) {
        *value = CellValue::Null;
    }
}

/// Names a header cell, keeping it verbatim where possible.
///
/// A blank header becomes `Unnamed: <idx>` and a repeated one gets a `.N`
/// suffix so every column name in the frame is unique.
pub fn header_name(raw: &str, idx: usize, existing_names: &mut HashSet<String>) -> String {
    let base_name = if raw.is_empty() {
        format!("Unnamed: {}", idx)
    } else {
        raw.to_string()
    };

    let mut name = base_name.clone();
    let mut counter = 1;
    while !existing_names.insert(name.clone()) {
        name = format!("{}.{}", base_name, counter);
        counter += 1;
    }

    name
}

/// Builds a table from a header row and row-major cells.
///
/// Short rows are padded with nulls. A row longer than the header is an
/// error, since its extra cells have no column to land in. Every cell keeps
/// its own kind, so a column may mix numbers and text.
pub fn build_table(headers: &[String], rows: &[Vec<CellValue>]) -> Result<Table, AppError> {
    if headers.is_empty() {
        return Err(AppError::InvalidInput("No header row found".to_string()));
    }

    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() > headers.len()) {
        return Err(AppError::FileProcessingError(format!(
            "Row {} has {} fields, expected at most {}",
            idx + 1,
            row.len(),
            headers.len()
        )));
    }

    let mut existing_names = HashSet::new();
    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(col_idx, header)| {
            let name = header_name(header, col_idx, &mut existing_names);
            let mut cells: Vec<CellValue> = rows
                .iter()
                .map(|row| row.get(col_idx).cloned().unwrap_or(CellValue::Null))
                .collect();
            settle_blank_cells(&mut cells);
            Column::new(name, cells)
        })
        .collect();

    Table::new(columns)
}
