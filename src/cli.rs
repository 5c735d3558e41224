use crate::services::OutputFormat;
use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

/// Analyze the percentage of filled values per column in Excel or CSV files.
#[derive(Parser, Debug)]
#[command(name = "fill-analysis", version, about)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["file", "directory"]),
))]
pub struct Cli {
    /// Path to the file to be analyzed
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Path to the directory containing the files to be analyzed
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Directory where the results will be stored
    #[arg(long, env = "FILL_ANALYSIS_OUTPUT", default_value = "results")]
    pub output: PathBuf,

    /// Spreadsheet format of the written results
    #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
    pub format: FormatArg,

    /// JSON file mapping column names to the values that count as filled
    #[arg(long = "valid-values")]
    pub valid_values: Option<PathBuf>,

    /// Field delimiter for CSV input
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Exit with status 3 when any file in a directory run fails
    #[arg(long)]
    pub strict: bool,
}

/// `--format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}
