//! Pagination types for list queries.
//!
//! These types implement Relay-style cursor pagination on top of the
//! offset-based windows understood by the legacy list protocol.

use crate::models::CountsEnvelope;

/// Opaque cursor for pagination.
///
/// The value encodes an absolute position and should be treated as an opaque
/// token by clients. See [`crate::pagination::encode_cursor`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub value: String,
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self { value }
    }
}

/// Pagination arguments of a list query.
///
/// Supports forward pagination (`first`/`after`), backward pagination
/// (`last`/`before`) and both at once.
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    /// Number of items to fetch (forward pagination).
    pub first: Option<i32>,
    /// Cursor to start after (forward pagination).
    pub after: Option<Cursor>,
    /// Number of items to fetch (backward pagination).
    pub last: Option<i32>,
    /// Cursor to end before (backward pagination).
    pub before: Option<Cursor>,
}

impl Pagination {
    /// Whether no bound and no size was supplied.
    pub fn is_unbounded(&self) -> bool {
        self.first.is_none() && self.after.is_none() && self.last.is_none() && self.before.is_none()
    }
}

/// Contiguous slice `[offset, offset + limit)` of the server's ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// 0-based index of the first row.
    pub offset: u64,
    /// Number of rows.
    pub limit: u64,
}

/// Paginated result set with edges, page info and counts.
///
/// This is the Relay connection pattern, extended with the count metadata of
/// the legacy protocol and a flat node list.
#[derive(Debug, Clone)]
pub struct Connection<T> {
    /// Nodes in page order.
    pub nodes: Vec<T>,
    /// List of edges (node + cursor pairs), same order as `nodes`.
    pub edges: Vec<Edge<T>>,
    /// Information about the current page.
    pub page_info: PageInfo,
    /// Total, filtered and window counts.
    pub counts: CountsEnvelope,
}

/// A single item in a paginated result.
#[derive(Debug, Clone)]
pub struct Edge<T> {
    /// The actual item.
    pub node: T,
    /// Cursor for this item (used for pagination).
    pub cursor: Cursor,
}

/// Information about the current page in a paginated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor of the first item in this page.
    pub start_cursor: Option<Cursor>,
    /// Cursor of the last item in this page.
    pub end_cursor: Option<Cursor>,
}
