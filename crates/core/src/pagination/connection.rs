//! Connection assembly.

use crate::models::CountsEnvelope;
use crate::ports::{Connection, Edge, PageInfo};

use super::cursor::encode_cursor;

/// Build a Relay connection from one fetched page.
///
/// Node `i` of the page gets the cursor of absolute index `counts.offset + i`.
/// Nodes keep their server order.
///
/// A page shorter than its limit is the last one, even when `filtered` still
/// reports rows past it.
pub fn assemble_connection<T: Clone>(
    entity: &str,
    nodes: Vec<T>,
    counts: CountsEnvelope,
) -> Connection<T> {
    let edges: Vec<Edge<T>> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| Edge {
            node: node.clone(),
            cursor: encode_cursor(entity, counts.offset.saturating_add(i as u64)),
        })
        .collect();

    let page_info = PageInfo {
        has_next_page: counts.length >= counts.limit
            && counts.offset.saturating_add(counts.length) < counts.filtered,
        has_previous_page: counts.offset > 0,
        start_cursor: edges.first().map(|e| e.cursor.clone()),
        end_cursor: edges.last().map(|e| e.cursor.clone()),
    };

    Connection {
        nodes,
        edges,
        page_info,
        counts,
    }
}
