use anyhow::{Context, Result};
use clap::Parser;
use fill_analysis::cli::Cli;
use fill_analysis::config::{self, Config};
use fill_analysis::logging;
use fill_analysis::services::{analyze_file, DirectoryAnalyzer, ResultExporter};
use std::path::Path;
use std::process::ExitCode;

/// Exit status for a directory run that finished with per-file failures
/// under `--strict`.
const PARTIAL_FAILURE: u8 = 3;

fn main() -> Result<ExitCode> {
    config::load_env();

    // Exits with a usage message (status 2) unless exactly one mode is given
    let cli = Cli::parse();

    logging::init_logging()?;

    let config = Config::from_cli(&cli)?;
    let exporter = ResultExporter::new(&config.output_dir, config.format);

    match (&cli.file, &cli.directory) {
        (Some(file), _) => run_file(file, &config, &exporter),
        (None, Some(directory)) => run_directory(directory, &config, &exporter),
        (None, None) => anyhow::bail!("You must specify --file or --directory to indicate what to scan."),
    }
}

fn run_file(file: &Path, config: &Config, exporter: &ResultExporter) -> Result<ExitCode> {
    let start = std::time::Instant::now();
    let report = analyze_file(file, &config.valid_values, &config.loader)
        .with_context(|| format!("Failed to analyze {}", file.display()))?;
    tracing::info!("Analysis of {} completed in {:?}", file.display(), start.elapsed());

    println!("\nResults:");
    print!("{}", report);

    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    exporter.export_file_report(&file_name, &report)?;

    Ok(ExitCode::SUCCESS)
}

fn run_directory(directory: &Path, config: &Config, exporter: &ResultExporter) -> Result<ExitCode> {
    let results = DirectoryAnalyzer::new(config.loader.clone())
        .analyze_all(directory, &config.valid_values)
        .with_context(|| format!("Failed to scan {}", directory.display()))?;

    let written = exporter.export_results(&results)?;
    tracing::info!("Wrote {} result files to {}", written.len(), exporter.output_dir().display());

    if results.has_failures() {
        for failure in results.failures() {
            eprintln!("Skipped {}: {}", failure.file_name, failure.reason);
        }
        if config.strict {
            return Ok(ExitCode::from(PARTIAL_FAILURE));
        }
    }

    Ok(ExitCode::SUCCESS)
}
