//! Count reconciliation.

use crate::models::{CountsEnvelope, RawCounts};

/// Normalize a server count envelope for a page of `returned` nodes.
///
/// The server's 1-based `start` becomes a 0-based offset. Responses without
/// a window element, or with a negative `max` ("all rows"), report the
/// returned length as their limit.
pub fn reconcile_counts(raw: &RawCounts, returned: usize) -> CountsEnvelope {
    let length = returned as u64;

    let (offset, limit) = match raw.window {
        Some(window) => (
            window.start.saturating_sub(1),
            u64::try_from(window.max).unwrap_or(length),
        ),
        None => (0, length),
    };

    CountsEnvelope {
        total: raw.total,
        filtered: raw.filtered,
        offset,
        limit,
        length,
    }
}
