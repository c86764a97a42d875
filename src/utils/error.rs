//! Error Handling
//!
//! Unified error types for the application, following the boundary taxonomy:
//! authorization, scoping (not found), input validation, configuration,
//! upstream model-call failures, and store failures are kept distinct so
//! callers can map each to the right response.

use thiserror::Error;

use guildhall_core::error::CoreError;
use guildhall_llm::types::LlmError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// No or invalid caller identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Entity absent or outside the caller's organization scope
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input: direct API input or tool input from the model
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing model credential or other configuration fault. Never
    /// retry-worthy, unlike `Upstream`.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion gateway call failed after credentials were valid
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(String),

    /// SQLite errors (auto-converted from rusqlite::Error)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Map tool-contract failures into the application taxonomy.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AppError::Validation(msg),
            CoreError::NotFound(msg) => AppError::NotFound(msg),
            CoreError::Config(msg) => AppError::Config(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Map gateway failures: a missing/invalid credential is a configuration
/// fault (fail fast, never retried); everything else is an upstream fault
/// the caller may surface as retry-suggesting.
impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        if err.is_configuration() {
            AppError::Config(err.to_string())
        } else {
            AppError::Upstream(err.to_string())
        }
    }
}

/// Convert AppError to a string suitable for boundary responses
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::not_found("conversation abc");
        assert_eq!(err.to_string(), "Not found: conversation abc");

        let err = AppError::validation("content is required");
        assert_eq!(err.to_string(), "Validation error: content is required");
    }

    #[test]
    fn test_core_error_mapping() {
        let err: AppError = CoreError::validation("create_client: missing field `name`").into();
        assert!(matches!(err, AppError::Validation(_)));

        let err: AppError = CoreError::internal("boom").into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_llm_error_mapping_splits_config_from_upstream() {
        let config: AppError = LlmError::AuthenticationFailed {
            message: "no key".to_string(),
        }
        .into();
        assert!(matches!(config, AppError::Config(_)));

        let upstream: AppError = LlmError::ServerError {
            message: "overloaded".to_string(),
            status: Some(529),
        }
        .into();
        assert!(matches!(upstream, AppError::Upstream(_)));

        let upstream: AppError = LlmError::NetworkError {
            message: "refused".to_string(),
        }
        .into();
        assert!(matches!(upstream, AppError::Upstream(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg: String = AppError::unauthorized("no session").into();
        assert!(msg.contains("Unauthorized"));
    }
}
