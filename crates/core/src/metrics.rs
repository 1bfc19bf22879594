//! Metrics definitions for the pagination layer.
//!
//! Metrics are collected using the `metrics` crate and can be exported
//! by whatever recorder the hosting binary installs.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

/// Initialize all metric descriptions.
/// Call this once at startup before any metrics are recorded.
pub fn init_metrics() {
    describe_counter!(
        "pages_served_total",
        "Total number of list pages assembled into connections"
    );
    describe_counter!(
        "cursor_decode_errors_total",
        "Total number of pagination requests rejected for an invalid cursor"
    );
    describe_counter!(
        "pagination_argument_errors_total",
        "Total number of pagination requests rejected for invalid first/last"
    );
    describe_counter!(
        "upstream_failures_total",
        "Total number of failed list protocol calls"
    );
    describe_histogram!(
        "upstream_fetch_duration_seconds",
        "Time taken by a list protocol call in seconds"
    );
}

/// Record a page served for an entity.
pub fn record_page_served(entity: &str) {
    counter!("pages_served_total", "entity" => entity.to_string()).increment(1);
}

/// Record a rejected cursor.
pub fn record_cursor_decode_error() {
    counter!("cursor_decode_errors_total").increment(1);
}

/// Record rejected `first`/`last` arguments.
pub fn record_pagination_argument_error() {
    counter!("pagination_argument_errors_total").increment(1);
}

/// Record a failed protocol call.
///
/// # Arguments
/// * `entity` - The entity tag of the list query
pub fn record_upstream_failure(entity: &str) {
    counter!("upstream_failures_total", "entity" => entity.to_string()).increment(1);
}

/// Record protocol call duration.
pub fn record_upstream_fetch_duration(duration_secs: f64) {
    histogram!("upstream_fetch_duration_seconds").record(duration_secs);
}

/// A timer that records the protocol call duration when dropped.
///
/// Dropping it on cancellation still records the time spent waiting.
pub struct FetchTimer {
    start: Instant,
}

impl FetchTimer {
    /// Start a new fetch timer.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for FetchTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FetchTimer {
    fn drop(&mut self) {
        record_upstream_fetch_duration(self.start.elapsed().as_secs_f64());
    }
}
