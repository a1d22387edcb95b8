//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Page through the GitHub GraphQL API
#[derive(Parser, Debug)]
#[command(name = "github-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Token to use instead of the configured source
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Use the offline demo identity
    #[arg(long, global = true)]
    pub demo: bool,

    /// GraphQL endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Retries after a failed transport attempt
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the authenticated user
    Viewer,

    /// Show a user's profile
    User {
        /// Login of the user
        login: String,
    },

    /// Show one repository and its newest issues
    Repo {
        /// Owner login
        owner: String,

        /// Repository name
        name: String,

        /// Issues to include
        #[arg(long, default_value = "100")]
        issues: u32,
    },

    /// List an owner's repositories, one page at a time
    Repos {
        /// Owner login
        owner: String,

        /// Repositories per page (1-100)
        #[arg(long)]
        page_size: Option<u32>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_repos() {
        let cli = Cli::parse_from([
            "github-pager",
            "--demo",
            "repos",
            "octocat",
            "--page-size",
            "10",
            "--max-pages",
            "2",
        ]);
        assert!(cli.demo);
        match cli.command {
            Commands::Repos {
                owner,
                page_size,
                max_pages,
            } => {
                assert_eq!(owner, "octocat");
                assert_eq!(page_size, Some(10));
                assert_eq!(max_pages, Some(2));
            }
            other => panic!("Expected Repos, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_repo_defaults() {
        let cli = Cli::parse_from(["github-pager", "repo", "octocat", "hello-world"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Repo { issues: 100, .. }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["github-pager", "viewer", "--max-retries", "0", "-v"]);
        assert_eq!(cli.max_retries, Some(0));
        assert!(cli.verbose);
    }
}
