//! HTTP module
//!
//! The reqwest-backed [`crate::graphql::RequestExecutor`].
//!
//! # Features
//!
//! - **Single-shot**: one POST per call; retries belong to [`crate::retry`]
//! - **Rate Limiting**: Token bucket limiter using governor, applied before each request
//! - **Error classification**: timeouts, connection failures, HTTP statuses and
//!   malformed bodies become [`crate::graphql::TransportError`]s; HTTP 401 becomes an auth failure

mod client;
mod rate_limit;

pub use client::{GITHUB_GRAPHQL_ENDPOINT, HttpExecutor, HttpExecutorConfig, HttpExecutorConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
