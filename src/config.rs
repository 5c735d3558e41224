use crate::cli::Cli;
use crate::error::AppError;
use crate::services::{LoaderOptions, OutputFormat, ValidValueSpec};
use std::path::PathBuf;

/// Loads `.env` into the process environment, if present.
///
/// Must run before argument parsing so env-backed flags can see it.
pub fn load_env() {
    dotenvy::dotenv().ok();
}

/// Valid values used when no `--valid-values` file is given.
pub fn default_valid_values() -> ValidValueSpec {
    ValidValueSpec::new()
        .with_column("COMPRABLE", ["S", " ", ""])
        .with_column("VENDIBLE", ["S", " ", ""])
}

#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub loader: LoaderOptions,
    pub valid_values: ValidValueSpec,
    pub strict: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        if !cli.delimiter.is_ascii() {
            return Err(AppError::InvalidInput(format!(
                "Delimiter must be a single ASCII character, got {:?}",
                cli.delimiter
            )));
        }

        let valid_values = match &cli.valid_values {
            Some(path) => {
                let spec = ValidValueSpec::from_json_file(path).map_err(|e| {
                    AppError::ParseError(format!("Failed to load valid values from {}: {}", path.display(), e))
                })?;
                tracing::info!("Loaded valid values for {} columns from {}", spec.len(), path.display());
                spec
            }
            None => default_valid_values(),
        };

        Ok(Config {
            output_dir: cli.output.clone(),
            format: cli.format.into(),
            loader: LoaderOptions {
                delimiter: cli.delimiter as u8,
                ..LoaderOptions::default()
            },
            valid_values,
            strict: cli.strict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn defaults_include_builtin_valid_values() {
        let cli = Cli::try_parse_from(["fill-analysis", "--file", "a.csv"]).unwrap();
        let config = Config::from_cli(&cli).unwrap();

        assert_eq!(config.loader.delimiter, b',');
        assert_eq!(config.format, OutputFormat::Xlsx);
        assert!(config.valid_values.rule_for("COMPRABLE").is_valid(&CellValue::from("")));
        assert!(config.valid_values.rule_for("VENDIBLE").is_valid(&CellValue::from(" ")));
    }

    #[test]
    fn valid_values_file_replaces_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"STATUS": ["Y", "N"]}}"#).unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["fill-analysis", "--file", "a.csv", "--valid-values", &path]).unwrap();
        let config = Config::from_cli(&cli).unwrap();

        assert_eq!(config.valid_values.len(), 1);
        assert!(!config.valid_values.rule_for("STATUS").is_valid(&CellValue::from("")));
    }

    #[test]
    fn csv_format_and_delimiter_reach_the_config() {
        let cli = Cli::try_parse_from(["fill-analysis", "--directory", "d", "--format", "csv", "--delimiter", ";"])
            .unwrap();
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.loader.delimiter, b';');
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let cli = Cli::try_parse_from(["fill-analysis", "--file", "a.csv", "--delimiter", "§"]).unwrap();
        assert!(matches!(Config::from_cli(&cli), Err(AppError::InvalidInput(_))));
    }
}
