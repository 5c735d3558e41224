use crate::error::AppError;
use crate::models::{AnalysisReport, DirectoryReport};
use polars::prelude::*;
use rust_xlsxwriter::Workbook;
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const COMBINED_BASE_NAME: &str = "complete_analysis";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Writes analysis reports as spreadsheets under one output directory.
pub struct ResultExporter {
    output_dir: PathBuf,
    format: OutputFormat,
}

impl ResultExporter {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<output_dir>/<base_name>_analysis.<ext>` for a source file name.
    pub fn report_path(&self, file_name: &str) -> PathBuf {
        let base_name = Path::new(file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        self.output_dir
            .join(format!("{}_analysis.{}", base_name, self.format.extension()))
    }

    pub fn combined_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", COMBINED_BASE_NAME, self.format.extension()))
    }

    /// `<output_dir>/<file_name>_analysis.<ext>`, keeping the source
    /// extension. Used when two sources share a base name.
    fn full_name_report_path(&self, file_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_analysis.{}", file_name, self.format.extension()))
    }

    pub fn export_file_report(&self, file_name: &str, report: &AnalysisReport) -> Result<PathBuf, AppError> {
        self.ensure_output_dir()?;
        let path = self.report_path(file_name);
        self.write_report(report, &path)?;
        Ok(path)
    }

    /// Writes one report per file plus the combined report.
    ///
    /// The combined report is written even when `results` is empty. When a
    /// report path is already taken (`a.csv` and `a.xlsx`, or a source whose
    /// report would land on the combined file) the later file's report keeps
    /// its full file name instead.
    pub fn export_results(&self, results: &DirectoryReport) -> Result<Vec<PathBuf>, AppError> {
        self.ensure_output_dir()?;

        let path = self.combined_path();
        let mut taken: HashSet<PathBuf> = HashSet::from([path.clone()]);

        let mut written = Vec::with_capacity(results.len() + 1);
        for (file_name, report) in results.iter() {
            let mut report_path = self.report_path(file_name);
            if !taken.insert(report_path.clone()) {
                let fallback = self.full_name_report_path(file_name);
                tracing::warn!(
                    "Report for {} would overwrite {}, writing {} instead",
                    file_name,
                    report_path.display(),
                    fallback.display()
                );
                taken.insert(fallback.clone());
                report_path = fallback;
            }
            self.write_report(report, &report_path)?;
            written.push(report_path);
        }

        let mut combined = results.to_combined_dataframe()?;
        self.write_frame(&mut combined, &path)?;
        tracing::info!("Combined results saved in: {}", path.display());
        written.push(path);

        Ok(written)
    }

    fn write_report(&self, report: &AnalysisReport, path: &Path) -> Result<(), AppError> {
        let mut df = report.to_dataframe()?;
        self.write_frame(&mut df, path)?;
        tracing::info!("Results saved in: {}", path.display());
        Ok(())
    }

    fn ensure_output_dir(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            AppError::OutputWriteError(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }

    fn write_frame(&self, df: &mut DataFrame, path: &Path) -> Result<(), AppError> {
        match self.format {
            OutputFormat::Xlsx => write_xlsx(df, path),
            OutputFormat::Csv => write_csv(df, path),
        }
    }
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::OutputWriteError(format!("Failed to create {}: {}", path.display(), e))
    })?;
    CsvWriter::new(&mut file)
        .finish(df)
        .map_err(|e| AppError::OutputWriteError(format!("Failed to write {}: {}", path.display(), e)))
}

fn write_xlsx(df: &DataFrame, path: &Path) -> Result<(), AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, series) in df.get_columns().iter().enumerate() {
        let col = col_idx as u16;
        worksheet.write_string(0, col, series.name())?;

        for row_idx in 0..series.len() {
            let row = row_idx as u32 + 1;
            match series.get(row_idx)? {
                AnyValue::Null => {}
                AnyValue::String(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                other => match other.extract::<f64>() {
                    Some(n) => {
                        worksheet.write_number(row, col, n)?;
                    }
                    None => {
                        worksheet.write_string(row, col, other.to_string().as_str())?;
                    }
                },
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_paths_use_the_source_stem() {
        let exporter = ResultExporter::new("out", OutputFormat::Xlsx);
        assert_eq!(exporter.report_path("sales.2024.csv"), Path::new("out/sales.2024_analysis.xlsx"));
        assert_eq!(exporter.combined_path(), Path::new("out/complete_analysis.xlsx"));

        let exporter = ResultExporter::new("out", OutputFormat::Csv);
        assert_eq!(exporter.report_path("stock.xlsx"), Path::new("out/stock_analysis.csv"));
    }

    #[test]
    fn output_directory_creation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ResultExporter::new(dir.path().join("nested/results"), OutputFormat::Csv);
        exporter.ensure_output_dir().unwrap();
        exporter.ensure_output_dir().unwrap();
        assert!(exporter.output_dir().is_dir());
    }
}
