//! Retry module
//!
//! Bounded retry with backoff around a single GraphQL request.
//!
//! # Classification
//!
//! | Failure | Retried? | Surfaced as |
//! |---------|----------|-------------|
//! | transport (timeout, connect, HTTP status, malformed body) | yes, up to `max_retries` | `Error::Transport` tagged with the operation |
//! | GraphQL `errors` | never | `Error::Application` carrying every message |
//! | rejected/missing credential | never | `Error::Auth` |

mod policy;

pub use policy::{RetryContext, RetryPolicy};
