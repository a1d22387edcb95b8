//! Client configuration
//!
//! A single YAML document configures the endpoint, retry behaviour,
//! throttling, credentials and demo data. Every field has a default, so an
//! empty file (or no file at all) yields a working configuration that reads
//! its token from `GITHUB_TOKEN`.
//!
//! ```yaml
//! endpoint: https://api.github.com/graphql
//! timeout_secs: 30
//! page_size: 100
//! retry:
//!   max_retries: 2
//!   initial_backoff_ms: 250
//!   max_backoff_ms: 8000
//!   backoff_type: exponential
//! rate_limit:
//!   requests_per_second: 10
//!   burst_size: 10
//! auth:
//!   token_env: GITHUB_TOKEN
//! demo:
//!   repository_count: 50
//! ```

use crate::auth::AuthConfig;
use crate::demo::DEFAULT_DEMO_REPOSITORY_COUNT;
use crate::error::{Error, Result};
use crate::http::{HttpExecutorConfig, RateLimiterConfig};
use crate::retry::RetryPolicy;
use crate::service::MAX_PAGE_SIZE;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Items requested per page (1..=100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Retry behaviour for transport failures
    #[serde(default)]
    pub retry: RetryConfig,

    /// Client-side throttling; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Credentials
    #[serde(default)]
    pub auth: AuthConfig,

    /// Offline demo data
    #[serde(default)]
    pub demo: DemoConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            page_size: default_page_size(),
            retry: RetryConfig::default(),
            rate_limit: default_rate_limit(),
            auth: AuthConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

fn default_endpoint() -> String {
    crate::http::GITHUB_GRAPHQL_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

impl ClientConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML document. A blank document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and the endpoint URL
    pub fn validate(&self) -> Result<()> {
        let endpoint = Url::parse(&self.endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", endpoint.scheme()),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::missing_field("user_agent"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(Error::invalid_value(
                "page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size),
            ));
        }
        self.retry.validate()?;
        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.requests_per_second",
                    "must be positive",
                ));
            }
        }
        Ok(())
    }

    /// HTTP executor settings
    pub fn executor_config(&self) -> HttpExecutorConfig {
        let builder = HttpExecutorConfig::builder()
            .endpoint(&self.endpoint)
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(&self.user_agent);
        let builder = match &self.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()),
            None => builder.no_rate_limit(),
        };
        builder.build()
    }

    /// Retry policy shared by every operation
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.policy()
    }
}

// ============================================================================
// Retry Config
// ============================================================================

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds
    pub initial_backoff_ms: u64,
    /// Cap for any single delay in milliseconds
    pub max_backoff_ms: u64,
    /// Shape of the backoff curve
    pub backoff_type: BackoffType,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff_ms: 250,
            max_backoff_ms: 8000,
            backoff_type: BackoffType::Exponential,
        }
    }
}

impl RetryConfig {
    fn validate(&self) -> Result<()> {
        if self.max_backoff_ms < self.initial_backoff_ms {
            return Err(Error::invalid_value(
                "retry.max_backoff_ms",
                "must not be smaller than retry.initial_backoff_ms",
            ));
        }
        Ok(())
    }

    /// Convert into a [`RetryPolicy`]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_retries(self.max_retries)
            .with_backoff(
                self.backoff_type,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            )
    }
}

// ============================================================================
// Demo Config
// ============================================================================

/// Demo data configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Repositories fabricated per demo session
    pub repository_count: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            repository_count: DEFAULT_DEMO_REPOSITORY_COUNT,
        }
    }
}
