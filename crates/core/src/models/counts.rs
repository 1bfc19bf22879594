//! Count metadata returned by list queries.

/// Window element of a list response, exactly as the server reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawWindow {
    /// 1-based index of the first returned row.
    pub start: u64,
    /// Requested page size. The protocol reports `-1` for "all rows".
    pub max: i64,
}

/// Count envelope of a list response, before reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCounts {
    /// Number of items that exist, ignoring the filter.
    pub total: u64,
    /// Number of items matching the filter.
    pub filtered: u64,
    /// Window element, absent on non-paginated calls.
    pub window: Option<RawWindow>,
}

/// Normalized counts for one fetched page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountsEnvelope {
    pub total: u64,
    pub filtered: u64,
    /// 0-based index of the first returned node.
    pub offset: u64,
    /// Page size the server applied.
    pub limit: u64,
    /// Number of nodes actually returned, may be below `limit` at the tail.
    pub length: u64,
}
