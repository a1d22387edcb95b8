//! Auth configuration types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::provider::{CredentialProvider, DemoCredentials, EnvCredentials, StaticCredentials};

/// Bearer token for the GitHub API.
///
/// `Debug` output is redacted so tokens never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Create a token, rejecting blank values
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::auth("token is empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw token value
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Authentication configuration, as read from the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Literal token (takes precedence over `token_env`)
    pub token: Option<String>,
    /// Environment variable read on every request
    pub token_env: String,
    /// Use the offline demo identity
    pub demo: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_env: "GITHUB_TOKEN".to_string(),
            demo: false,
        }
    }
}

impl AuthConfig {
    /// Build the credential provider this configuration describes
    pub fn provider(&self) -> Result<Arc<dyn CredentialProvider>> {
        if self.demo {
            return Ok(Arc::new(DemoCredentials));
        }
        match &self.token {
            Some(token) => Ok(Arc::new(StaticCredentials::new(Token::new(token.clone())?))),
            None => {
                if self.token_env.trim().is_empty() {
                    return Err(Error::missing_field("auth.token_env"));
                }
                Ok(Arc::new(EnvCredentials::new(self.token_env.clone())))
            }
        }
    }
}
