pub mod delimited;
pub mod excel;
pub mod utils;

use crate::error::AppError;
use crate::models::Table;
use std::path::Path;

/// Field values read as null from delimited files.
///
/// The empty string is deliberately absent: an empty text field is kept as
/// `""` so that it can be whitelisted per column.
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Excel,
}

impl FileKind {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 3] = ["csv", "xlsx", "xls"];

    /// Resolves the parser from the path's extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(FileKind::Csv),
            "xlsx" | "xls" => Ok(FileKind::Excel),
            "" => Err(AppError::UnsupportedFileType(String::from("(none)"))),
            other => Err(AppError::UnsupportedFileType(format!(".{}", other))),
        }
    }

    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderOptions {
    pub delimiter: u8,
    pub null_markers: Vec<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl LoaderOptions {
    pub fn is_null_marker(&self, field: &str) -> bool {
        self.null_markers.iter().any(|m| m == field)
    }
}

/// Loads a CSV or Excel file into a table, choosing the parser by extension.
pub fn load_table(path: &Path, options: &LoaderOptions) -> Result<Table, AppError> {
    let kind = FileKind::from_path(path)?;
    tracing::debug!("Loading {} as {:?}", path.display(), kind);

    let table = match kind {
        FileKind::Csv => delimited::load_delimited(path, options)?,
        FileKind::Excel => excel::load_workbook(path)?,
    };
    tracing::debug!(
        "Loaded {} rows x {} columns from {}",
        table.height(),
        table.width(),
        path.display()
    );

    Ok(table)
}
