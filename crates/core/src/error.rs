//! Error types for the pagination layer.
//!
//! This module defines a small hierarchy of error types:
//!
//! - [`UpstreamError`] - Failures of the legacy list protocol call
//! - [`PaginationError`] - Errors surfaced to the GraphQL layer
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Upstream Errors
// =============================================================================

/// Failures of the external list protocol call.
///
/// These errors originate in the protocol adapter: the request could not be
/// delivered, the server refused it, or its response envelope could not be
/// understood.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request could not be sent or no response was received.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status.
    #[error("Request rejected with status {status}: {text}")]
    Rejected {
        /// Status code reported by the server.
        status: String,
        /// Human readable status text.
        text: String,
    },

    /// The count/window envelope is missing or not numeric.
    #[error("Malformed count envelope: {0}")]
    MalformedEnvelope(String),

    /// The response is not well-formed XML.
    #[error("Malformed XML response: {0}")]
    MalformedXml(String),
}

// =============================================================================
// Pagination Errors
// =============================================================================

/// Errors returned while paginating a list query.
///
/// Every variant is surfaced to GraphQL clients as a typed error. Out-of-range
/// windows are never an error; they clamp.
#[derive(Debug, Error)]
pub enum PaginationError {
    /// Cursor could not be decoded into a `(tag, index)` pair.
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// `first`/`last` is negative or the argument combination is unusable.
    #[error("Invalid pagination argument: {0}")]
    InvalidPaginationArgument(String),

    /// The protocol call failed or returned an unreadable envelope.
    #[error("Upstream failure: {0}")]
    UpstreamFailure(#[from] UpstreamError),
}

impl PaginationError {
    /// Stable machine readable code, exposed as a GraphQL error extension.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCursor(_) => "INVALID_CURSOR",
            Self::InvalidPaginationArgument(_) => "INVALID_PAGINATION_ARGUMENT",
            Self::UpstreamFailure(_) => "UPSTREAM_FAILURE",
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for pagination operations.
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Result type for protocol operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
