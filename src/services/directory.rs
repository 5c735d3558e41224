use crate::error::AppError;
use crate::models::DirectoryReport;
use crate::services::analyzer::{analyze_file, ValidValueSpec};
use crate::services::loader::{FileKind, LoaderOptions};
use std::path::Path;
use walkdir::WalkDir;

pub struct DirectoryAnalyzer {
    options: LoaderOptions,
}

impl DirectoryAnalyzer {
    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Analyzes every supported file at the top level of `directory`.
    ///
    /// Entries are visited in file-name order. Files with other extensions
    /// and non-files are skipped silently; a file that fails to load or
    /// analyze is logged, recorded as a failure and left out of the report.
    pub fn analyze_all(&self, directory: &Path, spec: &ValidValueSpec) -> Result<DirectoryReport, AppError> {
        let metadata = std::fs::metadata(directory)?;
        if !metadata.is_dir() {
            return Err(AppError::InvalidInput(format!(
                "{} is not a directory",
                directory.display()
            )));
        }

        tracing::info!("Scanning directory {}", directory.display());
        let mut results = DirectoryReport::new();

        let entries = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !FileKind::is_supported(path) {
                tracing::debug!("Ignoring {}", path.display());
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            match analyze_file(path, spec, &self.options) {
                Ok(report) => {
                    tracing::info!("Analysis completed for: {}", file_name);
                    results.insert(file_name, report);
                }
                Err(e) => {
                    tracing::error!("Error analyzing {}: {}", file_name, e);
                    results.record_failure(file_name, e.to_string());
                }
            }
        }

        tracing::info!(
            "Analyzed {} files in {} ({} failed)",
            results.len(),
            directory.display(),
            results.failures().len()
        );
        Ok(results)
    }
}
