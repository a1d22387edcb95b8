//! Authentication module
//!
//! Supplies the bearer token for every fetch cycle.
//!
//! The [`CredentialProvider`] is consulted at the top of every request; a
//! provider may hand out a different token each time (e.g. after a refresh),
//! so callers never cache a token across pages. A provider may also report a
//! demo identity, in which case no network request is ever made.

mod provider;
mod types;

pub use provider::{CredentialProvider, DemoCredentials, EnvCredentials, StaticCredentials};
pub use types::{AuthConfig, Token};
