//! Error types for the shelf_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the shelf_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Fewer aligned rows than the model or the alignment needs
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    /// A series with zero rows where data was required
    #[error("Empty series: {0}")]
    EmptySeries(String),

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::DataError(err.to_string())
    }
}
