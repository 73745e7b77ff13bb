//! Error types for clinic intake.

use uuid::Uuid;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Address lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Address lookup errors. Never surfaced to the user; logged and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Postal code must have exactly 8 digits, got {digits}")]
    InvalidPostalCode { digits: usize },

    #[error("Address service request failed: {0}")]
    Transport(String),

    #[error("Address service returned a malformed body: {0}")]
    InvalidResponse(String),
}

/// Errors raised while delivering a submission to the intake endpoint.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Intake request failed: {0}")]
    Transport(String),
}

/// Aggregate validation failure that blocks a submission.
///
/// One error for the whole record, regardless of how many rows are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// User-facing message.
    pub message: String,
    /// Professionals whose registration number failed the length rule.
    pub invalid_professionals: Vec<Uuid>,
}

/// Result type alias for clinic intake.
pub type Result<T> = std::result::Result<T, Error>;
