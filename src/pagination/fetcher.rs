//! Single-page fetchers

use crate::auth::CredentialProvider;
use crate::error::{Error, Result};
use crate::graphql::queries::{
    RepositoryConnectionData, RepositoryConnectionQuery, RepositoryConnectionVariables,
};
use crate::graphql::{GraphqlOperation, GraphqlRequest, RequestExecutor};
use crate::retry::RetryPolicy;
use crate::types::{Cursor, Page, Repository};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Fetches one page of a connection.
///
/// Errors are propagated untouched; only successful responses are unpacked.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Item type of the connection
    type Item: Send;

    /// Operation name used in diagnostics
    fn operation_name(&self) -> &'static str;

    /// Fetch the page that starts after `cursor` (`None` = first page)
    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<Page<Self::Item>>;
}

/// Fetches pages of an owner's repositories
pub struct RepositoryPageFetcher {
    executor: Arc<dyn RequestExecutor>,
    credentials: Arc<dyn CredentialProvider>,
    retry: RetryPolicy,
    owner: String,
    page_size: u32,
}

impl RepositoryPageFetcher {
    /// Create a fetcher bound to one owner and page size
    pub fn new(
        executor: Arc<dyn RequestExecutor>,
        credentials: Arc<dyn CredentialProvider>,
        retry: RetryPolicy,
        owner: impl Into<String>,
        page_size: u32,
    ) -> Self {
        Self {
            executor,
            credentials,
            retry,
            owner: owner.into(),
            page_size,
        }
    }

    /// Owner whose repositories are listed
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Requested items per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch one page for an arbitrary owner, cursor and page size.
    ///
    /// A fresh token is requested on every call.
    pub async fn fetch(
        &self,
        owner: &str,
        cursor: Option<&Cursor>,
        page_size: u32,
    ) -> Result<Page<Repository>> {
        let token = self.credentials.token().await?;

        let variables = RepositoryConnectionVariables {
            login: owner.to_string(),
            first: page_size,
            after: cursor.map(|c| c.as_str().to_string()),
        };
        let request = GraphqlRequest::for_operation::<RepositoryConnectionQuery>(&variables)?;

        debug!(
            owner,
            page_size,
            after = cursor.map(Cursor::as_str),
            "Fetching repository page"
        );

        let executor = &self.executor;
        let request = &request;
        let token = &token;
        let data = self
            .retry
            .run(RepositoryConnectionQuery::OPERATION_NAME, || async move {
                executor
                    .execute(request, token)
                    .await?
                    .decode::<RepositoryConnectionData>()
            })
            .await?;

        let connection = data
            .user
            .ok_or_else(|| Error::not_found("user", owner))?
            .repositories;

        let nodes: Vec<Repository> = connection.nodes.into_iter().flatten().collect();
        Ok(Page::new(nodes, connection.page_info))
    }
}

#[async_trait]
impl PageFetcher for RepositoryPageFetcher {
    type Item = Repository;

    fn operation_name(&self) -> &'static str {
        RepositoryConnectionQuery::OPERATION_NAME
    }

    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<Page<Repository>> {
        self.fetch(&self.owner, cursor, self.page_size).await
    }
}
