//! GraphQL module
//!
//! Request/response plumbing for the fixed set of GitHub GraphQL operations.
//!
//! # Overview
//!
//! - [`GraphqlOperation`] describes one compile-time query: its text, its
//!   variables type and the shape of its `data` payload.
//! - [`RequestExecutor`] issues exactly one round trip and reports exactly one
//!   outcome: data, application-level GraphQL errors, or an [`ExecuteError`].
//!   It never retries; see [`crate::retry`] for that.
//! - [`queries`] holds the operations this crate consumes.

mod executor;
mod operation;
pub mod queries;

pub use executor::{
    ExecuteError, GraphqlOutcome, RequestExecutor, TransportError, TransportErrorKind,
};
pub use operation::{GraphqlError, GraphqlOperation, GraphqlRequest, GraphqlResponse};
