//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::service::GitHubGraphqlService;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Configuration file (or defaults) with command-line flags layered on top
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };

        if let Some(token) = &self.cli.token {
            config.auth.token = Some(token.clone());
        }
        if self.cli.demo {
            config.auth.demo = true;
        }
        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(max_retries) = self.cli.max_retries {
            config.retry.max_retries = max_retries;
        }
        if let Commands::Repos {
            page_size: Some(page_size),
            ..
        } = &self.cli.command
        {
            config.page_size = *page_size;
        }

        config.validate()?;
        Ok(config)
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.client_config()?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling");
                let _ = shutdown_tx.send(true);
            }
        });

        let service = GitHubGraphqlService::from_config(&config)?.with_shutdown(shutdown_rx);
        if service.is_demo() {
            info!("Running with the demo identity; no requests will be sent");
        }

        match &self.cli.command {
            Commands::Viewer => self.output(&service.current_user_info().await?),
            Commands::User { login } => self.output(&service.user(login).await?),
            Commands::Repo {
                owner,
                name,
                issues,
            } => self.output(&service.repository(owner, name, *issues).await?),
            Commands::Repos {
                owner, max_pages, ..
            } => self.repos(&service, owner, *max_pages).await,
        }
    }

    /// Stream an owner's repositories to stdout as pages arrive
    async fn repos(
        &self,
        service: &GitHubGraphqlService,
        owner: &str,
        max_pages: Option<usize>,
    ) -> Result<()> {
        let mut pager = service.repositories(owner, None)?;

        while let Some(page) = pager.next_page().await? {
            for repo in &page.items {
                self.output(repo)?;
            }
            if max_pages.is_some_and(|max| pager.stats().pages_fetched >= max) {
                info!(max_pages, "Page limit reached");
                break;
            }
        }

        let stats = pager.stats();
        info!(
            owner,
            pages = stats.pages_fetched,
            repositories = stats.items_yielded,
            "Listing complete"
        );
        Ok(())
    }

    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}
