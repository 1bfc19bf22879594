//! Position cursors.
//!
//! A cursor is the standard base64 encoding of `"<entity>:<index>"`, where
//! `index` is the 0-based absolute position of a node in the filtered result
//! set. Encoding is deterministic, so clients may cache cursors across
//! requests.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::{PaginationError, PaginationResult};
use crate::ports::Cursor;

const SEPARATOR: char = ':';

/// Decoded cursor content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPosition {
    /// Entity tag the cursor was issued for.
    pub entity: String,
    /// 0-based absolute index.
    pub index: u64,
}

/// Encode the position of a node into an opaque cursor.
pub fn encode_cursor(entity: &str, index: u64) -> Cursor {
    Cursor {
        value: STANDARD.encode(format!("{entity}{SEPARATOR}{index}")),
    }
}

/// Decode a cursor back into its entity tag and index.
///
/// The entity tag is not checked against anything.
pub fn decode_cursor_position(cursor: &Cursor) -> PaginationResult<CursorPosition> {
    let invalid = |reason: &str| {
        PaginationError::InvalidCursor(format!("'{}' {}", cursor.value, reason))
    };

    let bytes = STANDARD
        .decode(cursor.value.as_bytes())
        .map_err(|_| invalid("is not valid base64"))?;
    let text = String::from_utf8(bytes).map_err(|_| invalid("is not valid UTF-8"))?;

    let (entity, index) = text
        .rsplit_once(SEPARATOR)
        .ok_or_else(|| invalid("has no position"))?;

    // Digits only: signs, spaces and fractions are not canonical positions.
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("has no valid non-negative position"));
    }
    let index = index
        .parse::<u64>()
        .map_err(|_| invalid("has an out of range position"))?;

    Ok(CursorPosition {
        entity: entity.to_string(),
        index,
    })
}

/// Decode a cursor into its absolute index.
pub fn decode_cursor(cursor: &Cursor) -> PaginationResult<u64> {
    decode_cursor_position(cursor).map(|position| position.index)
}
