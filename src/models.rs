use crate::error::AppError;
use polars::prelude::*;
use serde::Deserialize;
use std::fmt;

pub const COLUMN: &str = "Column";
pub const TOTAL_ROWS: &str = "Total_Rows";
pub const FULL_VALUES: &str = "Full_Values";
pub const EMPTY_VALUES: &str = "Empty_Values";
pub const PERCENTAGE_FILLED: &str = "Percentage_Filled";
pub const FILE: &str = "File";

/// A single table cell as seen by the analyzer.
///
/// Equality is by kind and value: `Text("1")` never equals `Number(1.0)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Null or the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(CellValue::Null, |s| CellValue::Text(s.to_string()))
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Number)
    }
}

impl From<Option<bool>> for CellValue {
    fn from(value: Option<bool>) -> Self {
        value.map_or(CellValue::Null, CellValue::Boolean)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// A named column of tagged cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// An in-memory table whose cells keep their own kind.
///
/// A column may mix numbers, booleans and text; each cell is compared by
/// its own kind during analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    /// Fails if the columns differ in length.
    pub fn new(columns: Vec<Column>) -> Result<Self, AppError> {
        let height = columns.first().map_or(0, |c| c.cells.len());
        if let Some(column) = columns.iter().find(|c| c.cells.len() != height) {
            return Err(AppError::InvalidInput(format!(
                "Column {} has {} rows, expected {}",
                column.name,
                column.cells.len(),
                height
            )));
        }
        Ok(Self { columns, height })
    }

    /// Reads a polars frame column by column.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, AppError> {
        let columns = df
            .get_columns()
            .iter()
            .map(|series| Ok(Column::new(series.name(), series_cells(series)?)))
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok(Self {
            columns,
            height: df.height(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

fn series_cells(series: &Series) -> Result<Vec<CellValue>, AppError> {
    let cells: Vec<CellValue> = match series.dtype() {
        DataType::String => series.str()?.into_iter().map(CellValue::from).collect(),
        DataType::Boolean => series.bool()?.into_iter().map(CellValue::from).collect(),
        dtype if dtype.is_numeric() => {
            let floats = series.cast(&DataType::Float64)?;
            let cells: Vec<CellValue> = floats.f64()?.into_iter().map(CellValue::from).collect();
            cells
        }
        _ => {
            let strings = series.cast(&DataType::String)?;
            let cells: Vec<CellValue> = strings.str()?.into_iter().map(CellValue::from).collect();
            cells
        }
    };
    Ok(cells)
}

/// Fill statistics for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReport {
    pub column: String,
    pub total_rows: usize,
    pub full_values: usize,
    pub empty_values: usize,
    pub percentage_filled: f64,
}

/// Per-column reports for one table, in the table's column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    pub columns: Vec<ColumnReport>,
}

impl AnalysisReport {
    pub fn get(&self, column: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnReport> {
        self.columns.iter()
    }

    pub fn to_dataframe(&self) -> Result<DataFrame, AppError> {
        report_frame(self.columns.iter().map(|c| (c, "")), false)
    }
}

/// Renders every row as an aligned text table.
impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .columns
            .iter()
            .map(|c| c.column.chars().count())
            .chain(std::iter::once(COLUMN.len()))
            .max()
            .unwrap_or(COLUMN.len());

        writeln!(
            f,
            "{:<name_width$}  {:>10}  {:>11}  {:>12}  {:>17}",
            COLUMN, TOTAL_ROWS, FULL_VALUES, EMPTY_VALUES, PERCENTAGE_FILLED
        )?;
        for c in &self.columns {
            writeln!(
                f,
                "{:<name_width$}  {:>10}  {:>11}  {:>12}  {:>17.2}",
                c.column, c.total_rows, c.full_values, c.empty_values, c.percentage_filled
            )?;
        }
        Ok(())
    }
}

/// A file that could not be analyzed during a directory run.
#[derive(Debug, Clone, PartialEq)]
pub struct FileFailure {
    pub file_name: String,
    pub reason: String,
}

/// Reports keyed by file name, in directory listing order.
#[derive(Debug, Clone, Default)]
pub struct DirectoryReport {
    entries: Vec<(String, AnalysisReport)>,
    failures: Vec<FileFailure>,
}

impl DirectoryReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_name: impl Into<String>, report: AnalysisReport) {
        self.entries.push((file_name.into(), report));
    }

    pub fn record_failure(&mut self, file_name: impl Into<String>, reason: impl Into<String>) {
        self.failures.push(FileFailure {
            file_name: file_name.into(),
            reason: reason.into(),
        });
    }

    pub fn get(&self, file_name: &str) -> Option<&AnalysisReport> {
        self.entries
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, report)| report)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.get(file_name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnalysisReport)> {
        self.entries.iter().map(|(name, report)| (name.as_str(), report))
    }

    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Union of every per-file report with a trailing `File` column.
    ///
    /// An empty report still yields the full header with zero rows.
    pub fn to_combined_dataframe(&self) -> Result<DataFrame, AppError> {
        let rows = self.entries.iter().flat_map(|(name, report)| {
            report.columns.iter().map(move |c| (c, name.as_str()))
        });
        report_frame(rows, true)
    }
}

fn report_frame<'a, I>(rows: I, with_file: bool) -> Result<DataFrame, AppError>
where
    I: Iterator<Item = (&'a ColumnReport, &'a str)>,
{
    let mut columns: Vec<&str> = Vec::new();
    let mut totals: Vec<u64> = Vec::new();
    let mut full: Vec<u64> = Vec::new();
    let mut empty: Vec<u64> = Vec::new();
    let mut percentages: Vec<f64> = Vec::new();
    let mut files: Vec<&str> = Vec::new();

    for (report, file) in rows {
        columns.push(&report.column);
        totals.push(report.total_rows as u64);
        full.push(report.full_values as u64);
        empty.push(report.empty_values as u64);
        percentages.push(report.percentage_filled);
        files.push(file);
    }

    let mut series = vec![
        Series::new(COLUMN, columns),
        Series::new(TOTAL_ROWS, totals),
        Series::new(FULL_VALUES, full),
        Series::new(EMPTY_VALUES, empty),
        Series::new(PERCENTAGE_FILLED, percentages),
    ];
    if with_file {
        series.push(Series::new(FILE, files));
    }

    DataFrame::new(series)
        .map_err(|e| AppError::DataFrameError(format!("Failed to create report DataFrame: {}", e)))
}
