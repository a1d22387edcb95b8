//! Retry policy and per-invocation context

use crate::error::{Error, Result};
use crate::graphql::{ExecuteError, GraphqlOutcome};
use crate::types::BackoffType;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry configuration. Stateless between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (2 ⇒ up to 3 tries)
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Upper bound for any single delay
    pub max_backoff: Duration,
    /// Shape of the backoff curve
    pub backoff_type: BackoffType,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(8),
            backoff_type: BackoffType::Exponential,
        }
    }
}

impl RetryPolicy {
    /// Create the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that never retries
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Set max retries
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set backoff configuration
    #[must_use]
    pub fn with_backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Delay before retry number `retry_index` (0-based).
    ///
    /// Monotonically non-decreasing in `retry_index` for every curve.
    pub fn backoff_for(&self, retry_index: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff.saturating_mul(retry_index.saturating_add(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(retry_index);
                self.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }

    /// Run `op` until it yields data, a fatal error, or retries run out.
    ///
    /// `op` is invoked once per attempt and must perform exactly one request.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<GraphqlOutcome<T>, ExecuteError>>,
    {
        let mut ctx = RetryContext::new(operation, self.max_retries);

        loop {
            ctx.attempts_made += 1;

            match op().await {
                Ok(GraphqlOutcome::Data(data)) => {
                    debug!(
                        operation,
                        attempt = ctx.attempts_made,
                        "GraphQL request succeeded"
                    );
                    return Ok(data);
                }
                Ok(GraphqlOutcome::Errors(messages)) => {
                    warn!(
                        operation,
                        errors = messages.len(),
                        "GraphQL request returned application errors"
                    );
                    return Err(Error::application(operation, messages));
                }
                Err(ExecuteError::Auth(message)) => {
                    return Err(Error::auth(format!("{operation}: {message}")));
                }
                Err(ExecuteError::Transport(source)) => {
                    if !ctx.can_retry() {
                        return Err(Error::Transport {
                            operation: ctx.operation_name,
                            attempts: ctx.attempts_made,
                            source,
                        });
                    }

                    let delay = self.backoff_for(ctx.attempts_made - 1);
                    warn!(
                        "{} failed ({}), attempt {}/{}, retrying in {:?}",
                        operation, source, ctx.attempts_made, ctx.max_attempts, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Bookkeeping for one logical operation; discarded once `run` returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryContext {
    /// Attempts performed so far
    pub attempts_made: u32,
    /// Total attempts allowed (`max_retries + 1`)
    pub max_attempts: u32,
    /// Operation name for diagnostics
    pub operation_name: String,
}

impl RetryContext {
    /// Fresh context for an operation
    pub fn new(operation_name: impl Into<String>, max_retries: u32) -> Self {
        Self {
            attempts_made: 0,
            max_attempts: max_retries.saturating_add(1),
            operation_name: operation_name.into(),
        }
    }

    /// Whether another attempt is allowed
    pub fn can_retry(&self) -> bool {
        self.attempts_made < self.max_attempts
    }
}
