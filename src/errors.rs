//! Error types for HealthAI
//!
//! Input problems are recoverable and are reported back to the user by the
//! shell; everything else is an environment failure.

use thiserror::Error;

/// Main error type for the HealthAI assistant
#[derive(Error, Debug)]
pub enum HealthError {
    /// Missing, non-numeric or out-of-range user input
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        field: String,
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("HealthAI error: {0}")]
    Generic(String),
}

impl HealthError {
    /// Build an `InvalidInput` error for the given field
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        HealthError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the caller should prompt the user to correct input
    pub fn is_user_error(&self) -> bool {
        matches!(self, HealthError::InvalidInput { .. })
    }
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, HealthError>;

/// Convert anyhow errors to HealthError
impl From<anyhow::Error> for HealthError {
    fn from(err: anyhow::Error) -> Self {
        HealthError::Generic(err.to_string())
    }
}
