//! GitHub GraphQL service
//!
//! Entry point for callers: single-shot lookups (viewer, user, repository)
//! and the [`Pager`] factory for an owner's repositories. Every call asks the
//! credential provider for a fresh token and goes through the shared
//! [`RetryPolicy`].

use crate::auth::CredentialProvider;
use crate::config::ClientConfig;
use crate::demo::{self, DemoItem, DEFAULT_DEMO_REPOSITORY_COUNT, DEMO_AVATAR_URL};
use crate::error::{Error, Result};
use crate::graphql::queries::{
    NoVariables, RepositoryQuery, RepositoryVariables, UserQuery, UserVariables,
    ViewerLoginQuery,
};
use crate::graphql::{GraphqlOperation, GraphqlRequest, RequestExecutor};
use crate::http::HttpExecutor;
use crate::pagination::{Pager, RepositoryPageFetcher};
use crate::retry::RetryPolicy;
use crate::types::{Repository, RepositoryOwner, User, Viewer};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tokio::sync::watch;
use tracing::debug;

/// Largest `first:` GitHub accepts on a connection
pub const MAX_PAGE_SIZE: u32 = 100;

/// Issues fetched alongside a single repository by default
pub const DEFAULT_ISSUES_PER_REQUEST: u32 = 100;

/// GitHub login: alphanumerics and single hyphens, at most 39 characters
static LOGIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,37}[A-Za-z0-9])?$").expect("login pattern is valid")
});

/// Check that `login` has the shape of a GitHub user or organization login
pub fn validate_login(login: &str) -> Result<()> {
    if LOGIN_PATTERN.is_match(login) {
        Ok(())
    } else {
        Err(Error::InvalidOwner {
            owner: login.to_string(),
        })
    }
}

fn validate_page_size(field: &str, size: u32) -> Result<()> {
    if (1..=MAX_PAGE_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(Error::invalid_value(
            field,
            format!("must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
        ))
    }
}

/// Client for the fixed set of GitHub GraphQL operations
pub struct GitHubGraphqlService {
    executor: Arc<dyn RequestExecutor>,
    credentials: Arc<dyn CredentialProvider>,
    retry: RetryPolicy,
    page_size: u32,
    demo_repository_count: usize,
    shutdown: Option<watch::Receiver<bool>>,
}

impl GitHubGraphqlService {
    /// Create a service with default retry and paging settings
    pub fn new(executor: Arc<dyn RequestExecutor>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            executor,
            credentials,
            retry: RetryPolicy::default(),
            page_size: MAX_PAGE_SIZE,
            demo_repository_count: DEFAULT_DEMO_REPOSITORY_COUNT,
            shutdown: None,
        }
    }

    /// Build the HTTP-backed service a configuration describes
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let executor = HttpExecutor::with_config(config.executor_config())?;
        let credentials = config.auth.provider()?;
        Ok(Self::new(Arc::new(executor), credentials)
            .with_retry(config.retry_policy())
            .with_page_size(config.page_size)
            .with_demo_repository_count(config.demo.repository_count))
    }

    /// Set the retry policy used by every operation
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the default page size for [`Self::repositories`]
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set how many repositories a demo session fabricates
    #[must_use]
    pub fn with_demo_repository_count(mut self, count: usize) -> Self {
        self.demo_repository_count = count;
        self
    }

    /// Cancellation signal handed to every pager this service creates
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn is_demo(&self) -> bool {
        self.credentials.is_demo()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Login, name and avatar of the authenticated user
    pub async fn current_user_info(&self) -> Result<Viewer> {
        if self.is_demo() {
            return Ok(demo::viewer());
        }
        let data = self.execute::<ViewerLoginQuery>(&NoVariables {}).await?;
        Ok(data.viewer)
    }

    /// Profile of the user with the given login
    pub async fn user(&self, login: &str) -> Result<User> {
        validate_login(login)?;
        if self.is_demo() {
            return Ok(demo::user(login));
        }
        let variables = UserVariables {
            login: login.to_string(),
        };
        self.execute::<UserQuery>(&variables)
            .await?
            .user
            .ok_or_else(|| Error::not_found("user", login))
    }

    /// A single repository with up to `issues_per_request` of its newest issues
    pub async fn repository(
        &self,
        owner: &str,
        name: &str,
        issues_per_request: u32,
    ) -> Result<Repository> {
        validate_login(owner)?;
        if name.trim().is_empty() {
            return Err(Error::invalid_value("name", "repository name is empty"));
        }
        validate_page_size("issues_per_request", issues_per_request)?;

        if self.is_demo() {
            return Ok(demo_repository(owner, name));
        }

        let variables = RepositoryVariables {
            owner: owner.to_string(),
            name: name.to_string(),
            issue_count: issues_per_request,
        };
        self.execute::<RepositoryQuery>(&variables)
            .await?
            .repository
            .ok_or_else(|| Error::not_found("repository", format!("{owner}/{name}")))
    }

    /// Start a pagination session over `owner`'s repositories.
    ///
    /// Nothing is fetched until the first call to [`Pager::next_page`].
    /// `page_size` falls back to the service default.
    pub fn repositories(
        &self,
        owner: &str,
        page_size: Option<u32>,
    ) -> Result<Pager<RepositoryPageFetcher>> {
        validate_login(owner)?;
        let page_size = page_size.unwrap_or(self.page_size);
        validate_page_size("page_size", page_size)?;

        let fetcher = RepositoryPageFetcher::new(
            Arc::clone(&self.executor),
            Arc::clone(&self.credentials),
            self.retry.clone(),
            owner,
            page_size,
        );
        let pager = Pager::new(fetcher, Arc::clone(&self.credentials))
            .with_demo_item_count(self.demo_repository_count);

        Ok(match &self.shutdown {
            Some(shutdown) => pager.with_shutdown(shutdown.clone()),
            None => pager,
        })
    }

    /// One operation: fresh token, retried request, decoded `data`
    async fn execute<O: GraphqlOperation>(&self, variables: &O::Variables) -> Result<O::ResponseData> {
        let token = self.credentials.token().await?;
        let request = GraphqlRequest::for_operation::<O>(variables)?;
        debug!(operation = O::OPERATION_NAME, "Executing GraphQL operation");

        let executor = &self.executor;
        let request = &request;
        let token = &token;
        self.retry
            .run(O::OPERATION_NAME, || async move {
                executor
                    .execute(request, token)
                    .await?
                    .decode::<O::ResponseData>()
            })
            .await
    }
}

fn demo_repository(owner: &str, name: &str) -> Repository {
    let mut repo = Repository::fabricate(0);
    repo.name = name.to_string();
    repo.owner = RepositoryOwner {
        login: owner.to_string(),
        avatar_url: DEMO_AVATAR_URL.to_string(),
    };
    repo.url = format!("https://github.com/{owner}/{name}");
    repo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::TransportErrorKind;
    use crate::testing::{connection_page, CountingCredentials, ScriptedExecutor};
    use crate::types::BackoffType;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;
    use test_case::test_case;

    fn service(executor: &Arc<ScriptedExecutor>) -> GitHubGraphqlService {
        let executor: Arc<dyn RequestExecutor> = executor.clone();
        GitHubGraphqlService::new(executor, Arc::new(CountingCredentials::new())).with_retry(
            RetryPolicy::default().with_backoff(
                BackoffType::Constant,
                Duration::from_millis(1),
                Duration::from_millis(1),
            ),
        )
    }

    fn demo_service(executor: &Arc<ScriptedExecutor>) -> GitHubGraphqlService {
        let executor: Arc<dyn RequestExecutor> = executor.clone();
        GitHubGraphqlService::new(executor, Arc::new(CountingCredentials::demo()))
    }

    #[test_case("octocat" ; "plain")]
    #[test_case("a" ; "single character")]
    #[test_case("rust-lang" ; "hyphenated")]
    #[test_case("A1-b2-C3" ; "mixed case")]
    fn test_valid_logins(login: &str) {
        assert!(validate_login(login).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("-leading" ; "leading hyphen")]
    #[test_case("trailing-" ; "trailing hyphen")]
    #[test_case("has space" ; "space")]
    #[test_case("owner/repo" ; "slash")]
    #[test_case("bad\"quote" ; "quote")]
    fn test_invalid_logins(login: &str) {
        assert!(matches!(
            validate_login(login),
            Err(Error::InvalidOwner { .. })
        ));
    }

    #[test]
    fn test_login_length_limit() {
        assert!(validate_login(&"a".repeat(39)).is_ok());
        assert!(validate_login(&"a".repeat(40)).is_err());
    }

    #[tokio::test]
    async fn test_current_user_info() {
        let executor = Arc::new(ScriptedExecutor::new().then_data(json!({
            "viewer": {"login": "octocat", "name": "The Octocat", "avatarUrl": "https://a.example/o.png"}
        })));
        let viewer = service(&executor).current_user_info().await.unwrap();

        assert_eq!(
            viewer,
            Viewer {
                login: "octocat".to_string(),
                name: Some("The Octocat".to_string()),
                avatar_url: "https://a.example/o.png".to_string(),
            }
        );
        let requests = executor.requests();
        assert_eq!(requests[0].operation_name, "ViewerLogin");
    }

    #[tokio::test]
    async fn test_user_lookup() {
        let executor = Arc::new(ScriptedExecutor::new().then_data(json!({
            "user": {
                "login": "octocat",
                "avatarUrl": "https://a.example/o.png",
                "createdAt": "2011-01-25T18:44:36Z",
                "followers": {"totalCount": 10},
                "following": {"totalCount": 2}
            }
        })));
        let user = service(&executor).user("octocat").await.unwrap();

        assert_eq!(user.login, "octocat");
        assert_eq!(user.followers.total_count, 10);
        assert!(user.created_at.is_some());
        assert_eq!(executor.requests()[0].variables, json!({"login": "octocat"}));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let executor = Arc::new(ScriptedExecutor::new().then_data(json!({"user": null})));
        let err = service(&executor).user("ghost").await.unwrap_err();
        assert_eq!(err.to_string(), "user 'ghost' not found");
    }

    #[tokio::test]
    async fn test_invalid_owner_never_reaches_network() {
        let executor = Arc::new(ScriptedExecutor::new());
        let svc = service(&executor);

        assert!(matches!(
            svc.user("not a login").await,
            Err(Error::InvalidOwner { .. })
        ));
        assert!(matches!(
            svc.repositories("-bad", None),
            Err(Error::InvalidOwner { .. })
        ));
        assert!(matches!(
            svc.repository("bad owner", "repo", 10).await,
            Err(Error::InvalidOwner { .. })
        ));
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_repository_lookup_sends_issue_count() {
        let executor = Arc::new(ScriptedExecutor::new().then_data(json!({
            "repository": {
                "name": "hello-world",
                "owner": {"login": "octocat", "avatarUrl": "https://a.example/o.png"},
                "url": "https://github.com/octocat/hello-world",
                "issues": {
                    "totalCount": 1,
                    "nodes": [{"title": "Bug", "state": "OPEN", "createdAt": "2024-01-01T00:00:00Z"}]
                }
            }
        })));
        let repo = service(&executor)
            .repository("octocat", "hello-world", 5)
            .await
            .unwrap();

        assert_eq!(repo.issues.nodes.len(), 1);
        assert_eq!(
            executor.requests()[0].variables,
            json!({"owner": "octocat", "name": "hello-world", "issueCount": 5})
        );
    }

    #[tokio::test]
    async fn test_repository_rejects_bad_arguments() {
        let executor = Arc::new(ScriptedExecutor::new());
        let svc = service(&executor);
        assert!(svc.repository("octocat", " ", 5).await.is_err());
        assert!(svc.repository("octocat", "repo", 0).await.is_err());
        assert!(svc.repository("octocat", "repo", 101).await.is_err());
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_application_errors_are_not_retried() {
        let executor = Arc::new(
            ScriptedExecutor::new().then_errors(&["rate limited", "secondary limit"]),
        );
        let err = service(&executor).current_user_info().await.unwrap_err();

        assert_eq!(
            err.messages(),
            &["rate limited".to_string(), "secondary limit".to_string()]
        );
        assert_eq!(executor.call_count(), 1);
    }

    #[tokio::test]
    async fn test_auth_rejection_is_not_retried() {
        let executor = Arc::new(ScriptedExecutor::new().then_auth());
        let err = service(&executor).current_user_info().await.unwrap_err();
        assert!(err.is_auth());
        assert_eq!(executor.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_retried() {
        let executor = Arc::new(
            ScriptedExecutor::new()
                .then_transport(TransportErrorKind::HttpStatus(502))
                .then_data(json!({"viewer": {"login": "octocat", "avatarUrl": "x"}})),
        );
        let viewer = service(&executor).current_user_info().await.unwrap();
        assert_eq!(viewer.login, "octocat");
        assert_eq!(executor.call_count(), 2);
    }

    #[tokio::test]
    async fn test_repositories_pager() {
        let executor = Arc::new(
            ScriptedExecutor::new()
                .then_data(connection_page(&["a"], Some("c1"), true))
                .then_data(connection_page(&["b"], None, false)),
        );
        let svc = service(&executor).with_page_size(1);
        let pager = svc.repositories("octocat", None).unwrap();
        assert_eq!(pager.fetcher().page_size(), 1);
        // Creating a pager is free
        assert_eq!(executor.call_count(), 0);

        let repos = pager.collect_all().await.unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(executor.requests()[0].variables["first"], json!(1));
    }

    #[test]
    fn test_repositories_rejects_page_size() {
        let executor = Arc::new(ScriptedExecutor::new());
        let svc = service(&executor);
        assert!(matches!(
            svc.repositories("octocat", Some(0)),
            Err(Error::InvalidConfigValue { .. })
        ));
        assert!(svc.repositories("octocat", Some(101)).is_err());
        assert!(svc.repositories("octocat", Some(100)).is_ok());
    }

    #[tokio::test]
    async fn test_demo_service_is_offline() {
        let executor = Arc::new(ScriptedExecutor::new());
        let svc = demo_service(&executor).with_demo_repository_count(3);

        assert_eq!(svc.current_user_info().await.unwrap().login, demo::DEMO_LOGIN);
        assert_eq!(svc.user("octocat").await.unwrap().login, "octocat");
        let repo = svc.repository("octocat", "hello", 10).await.unwrap();
        assert_eq!(repo.url, "https://github.com/octocat/hello");

        let repos = svc
            .repositories("octocat", None)
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        assert_eq!(repos.len(), 3);
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_is_shared_with_pagers() {
        let executor = Arc::new(
            ScriptedExecutor::new().then_data(connection_page(&["a"], None, false)),
        );
        let (_tx, rx) = watch::channel(true);
        let svc = service(&executor).with_shutdown(rx);

        let mut pager = svc.repositories("octocat", None).unwrap();
        assert!(matches!(
            pager.next_page().await,
            Err(Error::Cancelled { .. })
        ));
        assert_eq!(executor.call_count(), 0);
    }
}
