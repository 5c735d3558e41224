pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use error::AppError;
pub use models::{AnalysisReport, CellValue, Column, ColumnReport, DirectoryReport, FileFailure, Table};
