pub mod analyzer;
pub mod directory;
pub mod exporter;
pub mod loader;

pub use analyzer::{analyze_file, ColumnAnalyzer, ValidValueSpec, ValidityRule};
pub use directory::DirectoryAnalyzer;
pub use exporter::{OutputFormat, ResultExporter};
pub use loader::{load_table, FileKind, LoaderOptions};
