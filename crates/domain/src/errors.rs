//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::BatchFailure;

/// Main error type for gabench
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum GaBenchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Batch(BatchFailure),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GaBenchError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Auth(_) => "auth",
            Self::Network(_) => "network",
            Self::Api { .. } => "api",
            Self::InvalidInput(_) => "invalid_input",
            Self::Batch(_) => "batch",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<BatchFailure> for GaBenchError {
    fn from(value: BatchFailure) -> Self {
        Self::Batch(value)
    }
}

/// Result type alias for gabench operations
pub type Result<T> = std::result::Result<T, GaBenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(GaBenchError::Config("x".into()).label(), "config");
        assert_eq!(GaBenchError::Api { status: 429, message: "quota".into() }.label(), "api");
        assert_eq!(GaBenchError::Internal("boom".into()).label(), "internal");
    }

    #[test]
    fn api_error_display_includes_status() {
        let err = GaBenchError::Api { status: 403, message: "User does not have access".into() };
        assert_eq!(err.to_string(), "API error (403): User does not have access");
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = GaBenchError::Network("connection reset".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Network");
        assert_eq!(json["message"], "connection reset");
    }
}
