//! Domain models of the pagination layer.
//!
//! These models are protocol-agnostic value types: the filter string sent to
//! the list protocol and the count metadata that comes back.

mod counts;
mod filter;

pub use counts::{CountsEnvelope, RawCounts, RawWindow};
pub use filter::{FIRST_KEYWORD, FilterTermString, ROWS_KEYWORD};
