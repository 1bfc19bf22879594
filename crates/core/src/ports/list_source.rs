//! Port trait for the legacy list protocol.
//!
//! The protocol client is a black box: given a filter string it returns an
//! ordered list of opaque result nodes plus a count envelope.

use async_trait::async_trait;

use crate::error::UpstreamResult;
use crate::models::{FilterTermString, RawCounts};

/// One page of results as returned by the protocol.
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    /// Result nodes in server order.
    pub nodes: Vec<T>,
    /// Count envelope of the response.
    pub counts: RawCounts,
}

/// Source of paginated list results.
///
/// Implementations issue one list request per call and hold no session state
/// between calls.
#[async_trait]
pub trait ListSource: Send + Sync {
    /// Opaque result node handed to the entity resolvers.
    type Node: Send;

    /// Entity tag used to namespace cursors (e.g. `"task"`).
    fn entity(&self) -> &str;

    /// Execute a list request with the given filter.
    async fn list(&self, filter: &FilterTermString) -> UpstreamResult<ListPage<Self::Node>>;
}
