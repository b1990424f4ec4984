//! Error types for the sales_forecast crate

use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed or empty historical series, missing required fields
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Malformed seasonality pattern or invalid forecast configuration
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Any other failure during numeric processing
    #[error("Computation error: {0}")]
    ComputationError(String),
}

impl ForecastError {
    /// Classification tag carried in the `error_type` field of a failure envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "ValidationError",
            Self::ConfigError(_) => "ConfigError",
            Self::ComputationError(_) => "ComputationError",
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
