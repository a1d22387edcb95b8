//! The fixed GitHub GraphQL operations consumed by this crate

use crate::types::{PageInfo, Repository, User, Viewer};
use serde::{Deserialize, Serialize};

use super::operation::GraphqlOperation;

// ============================================================================
// Viewer
// ============================================================================

/// Login, name and avatar of the authenticated user
pub struct ViewerLoginQuery;

/// Operation without variables
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Deserialize)]
pub struct ViewerLoginData {
    pub viewer: Viewer,
}

impl GraphqlOperation for ViewerLoginQuery {
    type Variables = NoVariables;
    type ResponseData = ViewerLoginData;

    const OPERATION_NAME: &'static str = "ViewerLogin";
    const QUERY: &'static str = "query ViewerLogin { viewer { login name avatarUrl } }";
}

// ============================================================================
// User
// ============================================================================

/// Single-user lookup by login
pub struct UserQuery;

#[derive(Debug, Clone, Serialize)]
pub struct UserVariables {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub user: Option<User>,
}

impl GraphqlOperation for UserQuery {
    type Variables = UserVariables;
    type ResponseData = UserData;

    const OPERATION_NAME: &'static str = "User";
    const QUERY: &'static str = "query User($login: String!) { \
        user(login: $login) { \
            login name avatarUrl bio company createdAt \
            followers { totalCount } following { totalCount } \
        } \
    }";
}

// ============================================================================
// Repository
// ============================================================================

/// Single-repository lookup including its most recent issues
pub struct RepositoryQuery;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryVariables {
    pub owner: String,
    pub name: String,
    pub issue_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryData {
    pub repository: Option<Repository>,
}

impl GraphqlOperation for RepositoryQuery {
    type Variables = RepositoryVariables;
    type ResponseData = RepositoryData;

    const OPERATION_NAME: &'static str = "Repository";
    const QUERY: &'static str = "query Repository($owner: String!, $name: String!, $issueCount: Int!) { \
        repository(owner: $owner, name: $name) { \
            name description forkCount url isFork \
            owner { login avatarUrl } \
            stargazers { totalCount } \
            issues(first: $issueCount, orderBy: {field: CREATED_AT, direction: DESC}) { \
                totalCount nodes { title state createdAt closedAt } \
            } \
        } \
    }";
}

// ============================================================================
// Repository Connection
// ============================================================================

/// One page of an owner's repositories.
///
/// The continuation token travels as the typed `$after` variable; `null`
/// requests the start of the collection.
pub struct RepositoryConnectionQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnectionVariables {
    pub login: String,
    pub first: u32,
    pub after: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryConnectionData {
    pub user: Option<RepositoryConnectionOwner>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryConnectionOwner {
    pub repositories: RepositoryConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnection {
    /// GitHub types `nodes` as `[Repository]`; entries may be null
    #[serde(default)]
    pub nodes: Vec<Option<Repository>>,
    pub page_info: PageInfo,
}

impl GraphqlOperation for RepositoryConnectionQuery {
    type Variables = RepositoryConnectionVariables;
    type ResponseData = RepositoryConnectionData;

    const OPERATION_NAME: &'static str = "RepositoryConnection";
    const QUERY: &'static str = "query RepositoryConnection($login: String!, $first: Int!, $after: String) { \
        user(login: $login) { \
            repositories(first: $first, after: $after) { \
                nodes { \
                    name description forkCount url isFork \
                    owner { login avatarUrl } \
                    stargazers { totalCount } \
                    issues(states: OPEN) { totalCount } \
                } \
                pageInfo { endCursor hasNextPage } \
            } \
        } \
    }";
}
