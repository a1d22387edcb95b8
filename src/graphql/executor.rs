//! Single-shot request execution
//!
//! The executor contract: one call, one network round trip, one outcome.

use crate::auth::Token;
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;

use super::operation::GraphqlRequest;

/// Result of a request that completed at the protocol level.
///
/// `Data` and `Errors` are mutually exclusive. Transport failures are not an
/// outcome; they are reported through [`ExecuteError`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphqlOutcome<T> {
    /// The `data` payload
    Data(T),
    /// Application-level error messages, in server order
    Errors(Vec<String>),
}

impl GraphqlOutcome<JsonValue> {
    /// Decode the raw `data` payload into an operation's response type
    pub fn decode<T: DeserializeOwned>(self) -> Result<GraphqlOutcome<T>, ExecuteError> {
        match self {
            Self::Data(value) => serde_json::from_value(value)
                .map(GraphqlOutcome::Data)
                .map_err(|e| ExecuteError::deserialize(e.to_string())),
            Self::Errors(messages) => Ok(GraphqlOutcome::Errors(messages)),
        }
    }
}

/// Classification of a transport-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request or response timed out
    Timeout,
    /// DNS resolution or connection establishment failed
    Connect,
    /// Non-success HTTP status outside GraphQL's own error channel
    HttpStatus(u16),
    /// The body could not be decoded into the expected shape
    Deserialize,
    /// Any other failure while sending the request
    Request,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timeout"),
            Self::Connect => f.write_str("connection failure"),
            Self::HttpStatus(status) => write!(f, "HTTP {status}"),
            Self::Deserialize => f.write_str("malformed response"),
            Self::Request => f.write_str("request failure"),
        }
    }
}

/// Failure at the network/protocol level
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {detail}")]
pub struct TransportError {
    /// What went wrong
    pub kind: TransportErrorKind,
    /// Human-readable detail
    pub detail: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_decode() {
            TransportErrorKind::Deserialize
        } else if let Some(status) = err.status() {
            TransportErrorKind::HttpStatus(status.as_u16())
        } else {
            TransportErrorKind::Request
        };
        Self::new(kind, err.to_string())
    }
}

/// Failure reported by a [`RequestExecutor`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecuteError {
    /// Network/protocol failure, eligible for retry
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The credential was missing or rejected
    #[error("credential rejected: {0}")]
    Auth(String),
}

impl ExecuteError {
    /// Create a deserialization failure
    pub fn deserialize(detail: impl Into<String>) -> Self {
        Self::Transport(TransportError::new(TransportErrorKind::Deserialize, detail))
    }

    /// Create a transport failure of the given kind
    pub fn transport(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        Self::Transport(TransportError::new(kind, detail))
    }
}

/// Issues one GraphQL request.
///
/// Implementations must not retry; every call is a single attempt.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute `request` with the given bearer token
    async fn execute(
        &self,
        request: &GraphqlRequest,
        token: &Token,
    ) -> Result<GraphqlOutcome<JsonValue>, ExecuteError>;
}
