//! Credential providers

use super::types::Token;
use crate::error::{Error, Result};
use async_trait::async_trait;

/// Source of the bearer token used for each request
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Current token. Called once per fetch cycle; never cache the result.
    async fn token(&self) -> Result<Token>;

    /// Whether this identity is the offline demo user
    fn is_demo(&self) -> bool {
        false
    }
}

/// A fixed token
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    token: Token,
}

impl StaticCredentials {
    pub fn new(token: Token) -> Self {
        Self { token }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn token(&self) -> Result<Token> {
        Ok(self.token.clone())
    }
}

/// Reads the token from an environment variable on every call
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the variable consulted
    pub fn var(&self) -> &str {
        &self.var
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentials {
    async fn token(&self) -> Result<Token> {
        let value = std::env::var(&self.var)
            .map_err(|_| Error::auth(format!("environment variable {} is not set", self.var)))?;
        Token::new(value)
    }
}

/// The offline demo identity. Never hands out a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCredentials;

#[async_trait]
impl CredentialProvider for DemoCredentials {
    async fn token(&self) -> Result<Token> {
        Err(Error::auth("demo identity has no token"))
    }

    fn is_demo(&self) -> bool {
        true
    }
}
