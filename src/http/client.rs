//! GraphQL-over-HTTP executor
//!
//! Sends one POST per call and classifies the result:
//! - 2xx with a GraphQL envelope → data or application errors
//! - 401 → credential rejected
//! - any other non-2xx status, timeout, connection failure or unreadable body → transport failure

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::Token;
use crate::error::{Error, Result};
use crate::graphql::{
    ExecuteError, GraphqlOutcome, GraphqlRequest, GraphqlResponse, RequestExecutor,
    TransportError, TransportErrorKind,
};
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// GitHub's GraphQL endpoint
pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// Longest body excerpt kept in an HTTP status error
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the HTTP executor
#[derive(Debug, Clone)]
pub struct HttpExecutorConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Request timeout; expiry surfaces as a transport timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string (GitHub rejects requests without one)
    pub user_agent: String,
}

impl Default for HttpExecutorConfig {
    fn default() -> Self {
        Self {
            endpoint: GITHUB_GRAPHQL_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: format!("github-pager/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpExecutorConfig {
    /// Create a new config builder
    pub fn builder() -> HttpExecutorConfigBuilder {
        HttpExecutorConfigBuilder::default()
    }
}

/// Builder for HTTP executor config
#[derive(Default)]
pub struct HttpExecutorConfigBuilder {
    config: HttpExecutorConfig,
}

impl HttpExecutorConfigBuilder {
    /// Set the endpoint
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpExecutorConfig {
        self.config
    }
}

/// Executes GraphQL requests over HTTP
pub struct HttpExecutor {
    client: Client,
    config: HttpExecutorConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpExecutor {
    /// Create an executor with custom configuration
    pub fn with_config(config: HttpExecutorConfig) -> Result<Self> {
        url::Url::parse(&config.endpoint)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(
        &self,
        request: &GraphqlRequest,
        token: &Token,
    ) -> std::result::Result<GraphqlOutcome<JsonValue>, ExecuteError> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self
            .client
            .post(&self.config.endpoint)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, token.bearer_header());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req
            .json(request)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        debug!(
            operation = %request.operation_name,
            status = status.as_u16(),
            "GraphQL round trip complete"
        );

        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(ExecuteError::Auth(truncate(&body)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExecuteError::transport(
                TransportErrorKind::HttpStatus(status.as_u16()),
                truncate(&body),
            ));
        }

        let envelope: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| ExecuteError::deserialize(e.to_string()))?;

        envelope.into_outcome()
    }
}

impl std::fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpExecutor")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
