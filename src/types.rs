//! Common types used throughout github-pager
//!
//! This module contains the pagination data model (cursors, page info,
//! pages) and the GitHub records returned by the fixed GraphQL operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Pagination Model
// ============================================================================

/// Opaque continuation token marking a position in a remote collection.
///
/// The start of a collection is represented by the absence of a cursor
/// (`Option<Cursor>::None`), never by an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from a server-issued token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse an optional token, treating blank strings as "start of collection"
    pub fn from_optional(token: Option<String>) -> Option<Self> {
        token.filter(|t| !t.trim().is_empty()).map(Self)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Continuation metadata returned alongside each page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Cursor of the last item in the page; blank tokens read as `None`
    #[serde(default, deserialize_with = "deserialize_end_cursor")]
    pub end_cursor: Option<Cursor>,
    /// Whether the server has more items after `end_cursor`
    #[serde(default)]
    pub has_next_page: bool,
}

fn deserialize_end_cursor<'de, D>(deserializer: D) -> Result<Option<Cursor>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Cursor::from_optional(Option::<String>::deserialize(deserializer)?))
}

impl PageInfo {
    /// Page info for a final page
    pub fn last() -> Self {
        Self::default()
    }

    /// Page info for a page that has a successor
    pub fn next(end_cursor: Cursor) -> Self {
        Self {
            end_cursor: Some(end_cursor),
            has_next_page: true,
        }
    }
}

/// One batch of items produced by a single fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items, in server order
    pub items: Vec<T>,
    /// Continuation metadata
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Number of items in the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether this page is the last one of its session
    pub fn is_last(&self) -> bool {
        !self.page_info.has_next_page
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// GitHub Records
// ============================================================================

/// The authenticated user, as returned by the viewer lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    /// Login handle
    pub login: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar image URL
    pub avatar_url: String,
}

/// A GitHub user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub followers: TotalCount,
    #[serde(default)]
    pub following: TotalCount,
}

/// Owner of a repository (user or organization)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryOwner {
    pub login: String,
    pub avatar_url: String,
}

/// `{ totalCount }` wrapper used by several GitHub connections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: u64,
}

impl TotalCount {
    pub fn new(total_count: u64) -> Self {
        Self { total_count }
    }
}

/// Open/closed state of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueState {
    Open,
    Closed,
}

/// An issue attached to a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub title: String,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

/// A repository's issue connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuesConnection {
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<Issue>,
}

/// A repository record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fork_count: u64,
    pub owner: RepositoryOwner,
    #[serde(default)]
    pub issues: IssuesConnection,
    pub url: String,
    #[serde(default)]
    pub stargazers: TotalCount,
    #[serde(default)]
    pub is_fork: bool,
}
