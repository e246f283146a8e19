//! Forecast engine error types

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when producing a forecast
///
/// All variants are pure, local conditions: nothing is retried and there is
/// no partial state to roll back. Display strings are written to be
/// surfaced to the user as-is.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Fewer than the two readings an AR(2) seed requires
    #[error("at least two readings are required for an AR(2) forecast (got {available})")]
    InsufficientHistory { available: usize },

    /// A seed reading that cannot be log-transformed
    #[error("reading of {mgdl} mg/dL at {time} cannot be log-transformed")]
    NonPositiveReading { mgdl: i32, time: DateTime<Utc> },

    /// Model constants that fail validation
    #[error("invalid forecast model: {0}")]
    InvalidModel(String),
}

/// Result type alias for forecast operations
pub type ForecastResult<T> = Result<T, ForecastError>;
