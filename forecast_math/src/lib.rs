//! # Forecast Math
//!
//! Numerical building blocks for the price forecasting pipeline.
//! This crate has no I/O: it splits ordered rows chronologically, fits an
//! ordinary least squares model and scores predictions against actuals.

use thiserror::Error;

pub mod metrics;
pub mod regression;
pub mod split;

pub use metrics::RegressionMetrics;
pub use regression::LinearModel;

/// Errors that can occur in regression and metric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Singular design matrix: {0}")]
    SingularMatrix(String),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

/// Result type for forecast math operations
pub type Result<T> = std::result::Result<T, MathError>;
