use crate::error::AppError;
use crate::models::{AnalysisReport, CellValue, ColumnReport, Table};
use crate::services::loader::{load_table, LoaderOptions};
use polars::prelude::DataFrame;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Column name to the values that count as filled for that column.
///
/// Columns without an entry fall back to the non-empty rule.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ValidValueSpec {
    columns: HashMap<String, Vec<CellValue>>,
}

impl ValidValueSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.insert(column, values);
        self
    }

    pub fn insert<I, V>(&mut self, column: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.columns
            .insert(column.into(), values.into_iter().map(Into::into).collect());
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn rule_for(&self, column: &str) -> ValidityRule<'_> {
        match self.columns.get(column) {
            Some(values) => ValidityRule::AllowedValues(values),
            None => ValidityRule::NonEmpty,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// How a column decides whether a cell is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidityRule<'a> {
    /// Not null, and not the empty string.
    NonEmpty,
    /// Exact (kind, value) membership in a whitelist.
    AllowedValues(&'a [CellValue]),
}

impl ValidityRule<'_> {
    pub fn is_valid(&self, cell: &CellValue) -> bool {
        match self {
            ValidityRule::NonEmpty => match cell {
                CellValue::Null => false,
                CellValue::Text(s) => !s.is_empty(),
                _ => true,
            },
            ValidityRule::AllowedValues(allowed) => allowed.contains(cell),
        }
    }
}

/// Fill percentage rounded to two decimals, half away from zero.
///
/// An empty table is 0% filled.
pub fn fill_percentage(valid_count: usize, total_rows: usize) -> f64 {
    if total_rows == 0 {
        return 0.0;
    }
    let percentage = valid_count as f64 / total_rows as f64 * 100.0;
    (percentage * 100.0).round() / 100.0
}

pub struct ColumnAnalyzer;

impl ColumnAnalyzer {
    /// Computes fill statistics for every column, in table order.
    pub fn analyze(&self, table: &Table, spec: &ValidValueSpec) -> AnalysisReport {
        let total_rows = table.height();

        let columns = table
            .columns()
            .iter()
            .map(|column| {
                let rule = spec.rule_for(&column.name);
                let valid_count = column.cells.iter().filter(|cell| rule.is_valid(cell)).count();

                ColumnReport {
                    column: column.name.clone(),
                    total_rows,
                    full_values: valid_count,
                    empty_values: total_rows - valid_count,
                    percentage_filled: fill_percentage(valid_count, total_rows),
                }
            })
            .collect();

        AnalysisReport { columns }
    }

    /// Analyzes a polars frame. Each column carries a single dtype, so its
    /// cells share one kind.
    pub fn analyze_frame(&self, df: &DataFrame, spec: &ValidValueSpec) -> Result<AnalysisReport, AppError> {
        let table = Table::from_dataframe(df)?;
        Ok(self.analyze(&table, spec))
    }
}

/// Loads a file and analyzes it.
pub fn analyze_file(
    path: &Path,
    spec: &ValidValueSpec,
    options: &LoaderOptions,
) -> Result<AnalysisReport, AppError> {
    let table = load_table(path, options)?;
    Ok(ColumnAnalyzer.analyze(&table, spec))
}
