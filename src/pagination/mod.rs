//! Pagination module
//!
//! Drives cursor-based GraphQL connections one page at a time.
//!
//! # Overview
//!
//! - [`PageFetcher`] fetches a single page for a cursor and unpacks the
//!   connection into items plus [`crate::types::PageInfo`].
//! - [`Pager`] owns the cursor for one session and hands pages to the caller
//!   on demand. Nothing is fetched ahead: the next request is only issued when
//!   the caller asks for the next page, so a caller that only needs a preview
//!   can stop after the first one.
//! - [`Pager::into_stream`] adapts a session into a `futures::Stream`.
//!
//! ```text
//!   Active ──fetch(cursor), hasNextPage──▶ Active   (cursor := endCursor)
//!   Active ──fetch(cursor), !hasNextPage─▶ Exhausted
//!   Active ──fatal error────────────────▶ Failed
//! ```

mod fetcher;
mod pager;
mod types;

pub use fetcher::{PageFetcher, RepositoryPageFetcher};
pub use pager::{PageStream, Pager};
pub use types::{PagerStats, PaginationState, SessionPhase};
