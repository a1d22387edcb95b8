//! CLI module
//!
//! Command-line interface for the GitHub GraphQL client.
//!
//! # Commands
//!
//! - `viewer` - Show the authenticated user
//! - `user` - Show a user's profile
//! - `repo` - Show one repository with its newest issues
//! - `repos` - List an owner's repositories page by page
//!
//! Records are written to stdout as JSON; logs go to stderr.

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
