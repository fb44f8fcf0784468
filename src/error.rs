use thiserror::Error;

use crate::alerting::CheckType;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Raised only by explicit validation of a threshold spec. Edits made through the
/// editor are clamped instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} = {value} is outside {min}..={max} for {check_type}")]
    OutOfRange {
        check_type: CheckType,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("warning ({warning}) must not exceed critical ({critical}) for {check_type}")]
    InvertedThresholds {
        check_type: CheckType,
        warning: f64,
        critical: f64,
    },
    #[error("consecutive_failures must be at least 1 for {0}")]
    ZeroConsecutiveFailures(CheckType),
}

impl From<ValidationError> for EditorError {
    fn from(err: ValidationError) -> Self {
        EditorError::InvalidInput(err.to_string())
    }
}
