//! Error types for the forecast_pipeline crate

use forecast_math::MathError;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for the forecast_pipeline crate
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Malformed row, unparseable date or non-numeric value
    #[error("Parse error at line {line}, column '{column}': {message}")]
    Parse {
        line: u64,
        column: String,
        message: String,
    },

    /// A required column is absent from a CSV header
    #[error("Missing column '{column}' in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// Invalid pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from regression or metric calculations
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the CSV reader or writer
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from JSON configuration parsing
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, PipelineError>;

impl From<tempfile::PersistError> for PipelineError {
    fn from(err: tempfile::PersistError) -> Self {
        PipelineError::Io(err.error)
    }
}
