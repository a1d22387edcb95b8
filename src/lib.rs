// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # github-pager
//!
//! Lazy, retrying cursor pagination over the GitHub GraphQL API.
//!
//! ## Features
//!
//! - **Lazy paging**: one request per `next_page()`, never a prefetch
//! - **Retry with backoff**: transport failures are retried; GraphQL errors and
//!   rejected credentials are not
//! - **Fresh credentials**: a token is requested for every page
//! - **Cancellation**: a `watch` signal abandons an in-flight fetch without
//!   moving the cursor
//! - **Demo identity**: fabricated data with no network access
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use github_pager::{ClientConfig, GitHubGraphqlService, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let service = GitHubGraphqlService::from_config(&ClientConfig::default())?;
//!
//!     let mut pager = service.repositories("rust-lang", Some(50))?;
//!     while let Some(page) = pager.next_page().await? {
//!         for repo in page.items {
//!             println!("{} ({} stars)", repo.name, repo.stargazers.total_count);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    GitHubGraphqlService                      │
//! │  current_user_info()   user()   repository()   repositories()│
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────┬────────────────────────┐
//! │    Pager     │     PageFetcher      │   CredentialProvider   │
//! │ cursor state │  one page per call   │ static / env / demo    │
//! └──────────────┴──────────┬───────────┴────────────────────────┘
//!                           │
//!                ┌──────────┴──────────┐
//!                │     RetryPolicy     │
//!                │ backoff, classify   │
//!                └──────────┬──────────┘
//!                           │
//!                ┌──────────┴──────────┐
//!                │   RequestExecutor   │
//!                │ HttpExecutor (HTTP) │
//!                └─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credential providers
pub mod auth;

/// GraphQL operations and the request executor contract
pub mod graphql;

/// HTTP executor with rate limiting
pub mod http;

/// Retry policy
pub mod retry;

/// Cursor pagination engine
pub mod pagination;

/// Fabricated demo data
pub mod demo;

/// High-level GitHub client
pub mod service;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{CredentialProvider, Token};
pub use config::ClientConfig;
pub use pagination::{PageFetcher, Pager, RepositoryPageFetcher};
pub use retry::RetryPolicy;
pub use service::GitHubGraphqlService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
