//! Pagination engine

use super::fetcher::PageFetcher;
use super::types::{PagerStats, PaginationState};
use crate::auth::CredentialProvider;
use crate::demo::{self, DemoItem, DEFAULT_DEMO_REPOSITORY_COUNT};
use crate::error::{Error, Result};
use crate::types::{Page, PageInfo};
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Type alias for the page stream returned by [`Pager::into_stream`]
pub type PageStream<T> = Pin<Box<dyn Stream<Item = Result<Page<T>>> + Send>>;

/// One pagination session.
///
/// Pages are produced strictly one at a time: a fetch (including all of its
/// retries) completes before the cursor moves and before the next fetch can
/// start. A new session is created for every listing; sessions share no
/// mutable state.
pub struct Pager<F: PageFetcher> {
    fetcher: F,
    credentials: Arc<dyn CredentialProvider>,
    state: PaginationState,
    stats: PagerStats,
    demo_item_count: usize,
    demo_session: Option<bool>,
    shutdown: Option<watch::Receiver<bool>>,
}

impl<F> Pager<F>
where
    F: PageFetcher,
    F::Item: DemoItem,
{
    /// Create a session starting at the beginning of the collection
    pub fn new(fetcher: F, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            fetcher,
            credentials,
            state: PaginationState::new(),
            stats: PagerStats::default(),
            demo_item_count: DEFAULT_DEMO_REPOSITORY_COUNT,
            demo_session: None,
            shutdown: None,
        }
    }

    /// Number of fabricated items produced for a demo identity
    #[must_use]
    pub fn with_demo_item_count(mut self, count: usize) -> Self {
        self.demo_item_count = count;
        self
    }

    /// Observe a cancellation signal.
    ///
    /// When the value becomes `true`, an in-flight fetch (network wait or
    /// backoff sleep) is abandoned and `Error::Cancelled` is returned with the
    /// cursor left untouched. Dropping the sender never cancels.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Current cursor state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Session counters
    pub fn stats(&self) -> PagerStats {
        self.stats
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Produce the next page, or `None` once the session is over.
    ///
    /// After a fatal error has been returned, subsequent calls return `None`.
    pub async fn next_page(&mut self) -> Result<Option<Page<F::Item>>> {
        if !self.state.is_active() {
            return Ok(None);
        }

        // Decided once per session
        let is_demo = *self
            .demo_session
            .get_or_insert_with(|| self.credentials.is_demo());
        if is_demo {
            let items: Vec<F::Item> = demo::fabricate(self.demo_item_count);
            info!(items = items.len(), "Demo identity, producing fabricated page");
            self.state.mark_exhausted();
            self.stats.add_page(items.len());
            return Ok(Some(Page::new(items, PageInfo::last())));
        }

        let operation = self.fetcher.operation_name();
        if self.stats.pages_fetched == 0 {
            info!(operation, "Starting pagination session");
        }

        let cursor = self.state.current_cursor.clone();
        let fetch = self.fetcher.fetch_page(cursor.as_ref());

        let result = match self.shutdown.as_mut() {
            Some(shutdown) => {
                tokio::select! {
                    biased;
                    () = cancelled(shutdown) => {
                        info!(operation, "Pagination cancelled");
                        return Err(Error::cancelled(operation));
                    }
                    result = fetch => result,
                }
            }
            None => fetch.await,
        };

        let mut page = match result {
            Ok(page) => page,
            Err(e) => {
                self.state.mark_failed();
                return Err(e);
            }
        };

        match page.page_info.end_cursor.clone() {
            Some(next) if page.page_info.has_next_page => {
                if self.state.has_used(&next) {
                    warn!(operation, cursor = %next, "Server reused a cursor, ending session");
                    page.page_info.has_next_page = false;
                    self.state.mark_exhausted();
                } else {
                    self.state.advance(next);
                }
            }
            None if page.page_info.has_next_page => {
                warn!(operation, "hasNextPage without endCursor, ending session");
                page.page_info.has_next_page = false;
                self.state.mark_exhausted();
            }
            _ => self.state.mark_exhausted(),
        }

        self.stats.add_page(page.len());
        debug!(
            operation,
            page = self.stats.pages_fetched,
            items = page.len(),
            has_next_page = page.page_info.has_next_page,
            "Page produced"
        );
        if self.state.is_exhausted() {
            info!(
                operation,
                pages = self.stats.pages_fetched,
                items = self.stats.items_yielded,
                "Pagination session exhausted"
            );
        }

        Ok(Some(page))
    }

    /// Drain the session into a single list
    pub async fn collect_all(mut self) -> Result<Vec<F::Item>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.items);
        }
        Ok(items)
    }

    /// Adapt the session into a stream that ends after exhaustion or after
    /// the first error.
    pub fn into_stream(self) -> PageStream<F::Item>
    where
        F: 'static,
        F::Item: 'static,
    {
        Box::pin(futures::stream::unfold(
            (self, false),
            |(mut pager, done)| async move {
                if done {
                    return None;
                }
                match pager.next_page().await {
                    Ok(Some(page)) => Some((Ok(page), (pager, false))),
                    Ok(None) => None,
                    Err(e) => Some((Err(e), (pager, true))),
                }
            },
        ))
    }
}

/// Resolves once the signal reads `true`; never resolves if the sender is gone
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    let sender_dropped = shutdown.wait_for(|cancelled| *cancelled).await.is_err();
    if sender_dropped {
        std::future::pending::<()>().await;
    }
}
