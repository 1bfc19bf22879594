//! Pager service - runs one paginated list request end to end.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::error::{PaginationError, PaginationResult};
use crate::metrics::{
    FetchTimer, record_cursor_decode_error, record_page_served,
    record_pagination_argument_error, record_upstream_failure,
};
use crate::models::FilterTermString;
use crate::pagination::{apply_window, assemble_connection, reconcile_counts};
use crate::ports::{Connection, ListSource, Pagination};

/// Paginates list queries of one entity over a [`ListSource`].
///
/// # Flow
///
/// 1. Compute the filter string for the requested window
/// 2. Execute it against the list source
/// 3. Normalize the returned count envelope
/// 4. Assemble the Relay connection with position cursors
///
/// The service holds no per-request state; concurrent calls are independent.
pub struct PagerService<S: ListSource + ?Sized> {
    source: Arc<S>,
}

impl<S: ListSource + ?Sized> Clone for PagerService<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<S: ListSource + ?Sized> PagerService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Entity tag of the underlying source.
    pub fn entity(&self) -> &str {
        self.source.entity()
    }

    /// Fetch one page and assemble it into a connection.
    #[instrument(skip_all, fields(entity = %self.source.entity()))]
    pub async fn paginate(
        &self,
        filter: &FilterTermString,
        pagination: &Pagination,
    ) -> PaginationResult<Connection<S::Node>>
    where
        S::Node: Clone,
    {
        let entity = self.source.entity();

        let windowed = apply_window(filter, pagination).inspect_err(|e| {
            warn!(error = %e, "Rejected pagination arguments");
            match e {
                PaginationError::InvalidCursor(_) => record_cursor_decode_error(),
                _ => record_pagination_argument_error(),
            }
        })?;

        debug!(filter = %windowed, "Fetching page");

        let page = {
            let _timer = FetchTimer::new();
            self.source.list(&windowed).await
        }
        .map_err(|e| {
            warn!(error = %e, "List request failed");
            record_upstream_failure(entity);
            PaginationError::from(e)
        })?;

        let counts = reconcile_counts(&page.counts, page.nodes.len());
        debug!(
            total = counts.total,
            filtered = counts.filtered,
            offset = counts.offset,
            length = counts.length,
            "Page fetched"
        );

        record_page_served(entity);
        Ok(assemble_connection(entity, page.nodes, counts))
    }
}
