use thiserror::Error;

use crate::config::error::ConfigError;

/// Application-wide error type for the notification flow.
///
/// Each outbound integration reports failures through the upstream variants
/// so the HTTP layer can answer with a gateway error without leaking the
/// provider's raw response to the visitor.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required credential or configuration key is absent
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    /// Transport-level failure talking to an external service
    #[error("{service} is unreachable")]
    UpstreamUnreachable {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// External service answered with a non-success HTTP status
    #[error("{service} rejected the request with status {status}: {message}")]
    UpstreamRejected {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// External service answered, but not with the payload we expect
    #[error("{service} returned a malformed response: {reason}")]
    MalformedResponse {
        service: &'static str,
        reason: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Name of the external service involved, if any.
    pub fn upstream_service(&self) -> Option<&'static str> {
        match self {
            AppError::UpstreamUnreachable { service, .. }
            | AppError::UpstreamRejected { service, .. }
            | AppError::MalformedResponse { service, .. } => Some(service),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::MissingKey(key) => AppError::ConfigMissing { key },
            ConfigError::ValidationError { field, message } => AppError::Validation {
                field,
                reason: message,
            },
            other => AppError::Configuration {
                key: "settings".to_string(),
                source: other.into(),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
