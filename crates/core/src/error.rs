//! Error types for WikiQA.
//!
//! This module defines a unified error enum covering configuration, input
//! validation, the upstream encyclopedia service, the offline article
//! database, and answer rendering.

use thiserror::Error;

/// Unified error type for WikiQA.
///
/// All fallible functions return `Result<T, AppError>`. The answer pipeline
/// converts `Validation`, `Upstream` and `NotFound` into a failed answer
/// instead of propagating them.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or oversized input, rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Encyclopedia service unreachable, non-success status, or bad payload
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Exact-title lookup found no page
    #[error("Not found: {0}")]
    NotFound(String),

    /// Offline article database errors
    #[error("Database error: {0}")]
    Database(String),

    /// Answer template errors
    #[error("Template error: {0}")]
    Template(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_category() {
        let err = AppError::Upstream("status 503".to_string());
        assert_eq!(err.to_string(), "Upstream error: status 503");

        let err = AppError::NotFound("Quantum computing".to_string());
        assert_eq!(err.to_string(), "Not found: Quantum computing");

        let err = AppError::Database("no such table: articles".to_string());
        assert_eq!(err.to_string(), "Database error: no such table: articles");
    }

    #[test]
    fn test_json_error_maps_to_serialization() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
