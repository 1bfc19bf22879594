//! Cursor-window pagination engine.
//!
//! Pure functions that bridge Relay cursor pagination and the offset-based
//! windows of the legacy list protocol:
//!
//! - [`apply_window`] - pagination arguments → filter string to send
//! - [`reconcile_counts`] - server count envelope → [`CountsEnvelope`]
//! - [`assemble_connection`] - nodes + counts → Relay [`Connection`]
//! - [`encode_cursor`] / [`decode_cursor`] - opaque position cursors
//!
//! [`CountsEnvelope`]: crate::models::CountsEnvelope
//! [`Connection`]: crate::ports::Connection

mod connection;
mod counts;
mod cursor;
mod window;

pub use connection::assemble_connection;
pub use counts::reconcile_counts;
pub use cursor::{CursorPosition, decode_cursor, decode_cursor_position, encode_cursor};
pub use window::{WindowDirection, apply_window, resolve_window};
