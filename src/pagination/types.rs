//! Pagination session state

use crate::types::Cursor;
use std::collections::HashSet;

/// Lifecycle of a pagination session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// More pages may follow (or the first fetch has not happened yet)
    #[default]
    Active,
    /// The last page has been produced
    Exhausted,
    /// A fatal error was surfaced; no further fetches happen
    Failed,
}

/// Cursor state owned by exactly one session.
///
/// Only mutated after a fetch has fully completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Cursor for the next request; `None` is the start of the collection
    pub current_cursor: Option<Cursor>,
    /// Where the session is in its lifecycle
    pub phase: SessionPhase,
    /// Every cursor this session has advanced to
    pub used_cursors: HashSet<Cursor>,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether another fetch may be issued
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Whether the last page has been produced
    pub fn is_exhausted(&self) -> bool {
        self.phase == SessionPhase::Exhausted
    }

    /// Whether the session already advanced to `cursor`
    pub fn has_used(&self, cursor: &Cursor) -> bool {
        self.used_cursors.contains(cursor)
    }

    /// Move to the next cursor
    pub fn advance(&mut self, cursor: Cursor) {
        self.used_cursors.insert(cursor.clone());
        self.current_cursor = Some(cursor);
    }

    /// Mark pagination as complete
    pub fn mark_exhausted(&mut self) {
        self.phase = SessionPhase::Exhausted;
    }

    /// Mark the session as terminated by an error
    pub fn mark_failed(&mut self) {
        self.phase = SessionPhase::Failed;
    }
}

/// Counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagerStats {
    /// Pages handed to the caller
    pub pages_fetched: usize,
    /// Items handed to the caller
    pub items_yielded: usize,
}

impl PagerStats {
    /// Record a produced page
    pub fn add_page(&mut self, items: usize) {
        self.pages_fetched += 1;
        self.items_yielded += items;
    }
}
