use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("File processing error: {0}")]
    FileProcessingError(String),

    #[error("DataFrame error: {0}")]
    DataFrameError(String),

    #[error("Output write error: {0}")]
    OutputWriteError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<polars::error::PolarsError> for AppError {
    fn from(err: polars::error::PolarsError) -> Self {
        AppError::DataFrameError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::FileProcessingError(format!("Failed to read CSV file: {}", err))
    }
}

impl From<calamine::Error> for AppError {
    fn from(err: calamine::Error) -> Self {
        AppError::FileProcessingError(format!("Failed to open Excel file: {}", err))
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::OutputWriteError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}
