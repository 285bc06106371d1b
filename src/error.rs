//! Error types for Workout Flux

use thiserror::Error;

/// Errors that can occur while building or computing a workout
#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("Invalid duration: {0} h (must be a positive, non-subnormal value)")]
    InvalidDuration(f64),

    #[error("Invalid {field}: {value} ({reason})")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Readings give a non-finite {quantity} for {activity}")]
    NonFiniteResult {
        activity: &'static str,
        quantity: &'static str,
    },

    #[error("Wrong number of parameters for {code}: expected {expected}, got {actual}")]
    ArityMismatch {
        code: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse workout packages: {0}")]
    ParseError(String),
}
