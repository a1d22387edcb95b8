//! Error types for github-pager
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Three failure families matter to callers of the pager:
//! - transport failures (retried by [`crate::retry::RetryPolicy`], fatal once exhausted)
//! - application-level GraphQL errors (never retried, all messages aggregated)
//! - authentication failures (never retried, distinct so callers can re-authenticate)

use crate::graphql::TransportError;
use thiserror::Error;

/// The main error type for github-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("{operation}: transport failure after {attempts} attempt(s): {source}")]
    Transport {
        operation: String,
        attempts: u32,
        #[source]
        source: TransportError,
    },

    #[error("{operation}: GraphQL returned {} error(s): {}", messages.len(), messages.join("; "))]
    Application {
        operation: String,
        messages: Vec<String>,
    },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("{operation} cancelled")]
    Cancelled { operation: String },

    #[error("Invalid repository owner '{owner}'")]
    InvalidOwner { owner: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: String, name: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an application (GraphQL `errors`) error
    pub fn application(operation: impl Into<String>, messages: Vec<String>) -> Self {
        Self::Application {
            operation: operation.into(),
            messages,
        }
    }

    /// Create a cancellation error
    pub fn cancelled(operation: impl Into<String>) -> Self {
        Self::Cancelled {
            operation: operation.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Check if this error should trigger re-authentication
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }

    /// GraphQL messages carried by an application error
    pub fn messages(&self) -> &[String] {
        match self {
            Error::Application { messages, .. } => messages,
            _ => &[],
        }
    }
}

/// Result type alias for github-pager
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::TransportErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("endpoint");
        assert_eq!(err.to_string(), "Missing required config field: endpoint");

        let err = Error::auth("token rejected");
        assert_eq!(err.to_string(), "Authentication failed: token rejected");

        let err = Error::not_found("user", "ghost");
        assert_eq!(err.to_string(), "user 'ghost' not found");
    }

    #[test]
    fn test_application_error_lists_every_message() {
        let err = Error::application(
            "RepositoryConnection",
            vec!["rate limited".to_string(), "try later".to_string()],
        );
        let rendered = err.to_string();
        assert!(rendered.contains("2 error(s)"));
        assert!(rendered.contains("rate limited"));
        assert!(rendered.contains("try later"));
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_transport_error_is_tagged_with_operation() {
        let err = Error::Transport {
            operation: "ViewerLogin".to_string(),
            attempts: 3,
            source: TransportError::new(TransportErrorKind::Timeout, "deadline elapsed"),
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("ViewerLogin"));
        assert!(rendered.contains("3 attempt(s)"));
    }

    #[test]
    fn test_is_retryable() {
        let transport = Error::Transport {
            operation: "op".to_string(),
            attempts: 1,
            source: TransportError::new(TransportErrorKind::Connect, "refused"),
        };
        assert!(transport.is_retryable());

        assert!(!Error::application("op", vec!["boom".to_string()]).is_retryable());
        assert!(!Error::auth("expired").is_retryable());
        assert!(!Error::cancelled("op").is_retryable());
        assert!(!Error::config("bad").is_retryable());
    }

    #[test]
    fn test_is_auth() {
        assert!(Error::auth("missing").is_auth());
        assert!(!Error::config("missing").is_auth());
    }
}
