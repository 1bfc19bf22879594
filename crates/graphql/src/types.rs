//! GraphQL type definitions.

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use scanql_core::models::CountsEnvelope;
use scanql_core::ports;
use scanql_gmp::XmlNode;

use crate::schema::ListQuery;

/// Schema type served by [`crate::build_schema`].
pub type ScanqlSchema = Schema<ListQuery, EmptyMutation, EmptySubscription>;

// -----------------------------------------------------------------------------
// Connection Types (Relay-style pagination)
// -----------------------------------------------------------------------------

#[derive(async_graphql::SimpleObject, Debug, Clone)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

impl From<ports::PageInfo> for PageInfo {
    fn from(info: ports::PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor.map(|c| c.value),
            end_cursor: info.end_cursor.map(|c| c.value),
        }
    }
}

/// Row counts of a list response.
///
/// `offset` is zero based. `limit` is the requested page size, or the number
/// of returned rows when the server returned everything.
#[derive(async_graphql::SimpleObject, Debug, Clone, Copy)]
pub struct Counts {
    pub total: u64,
    pub filtered: u64,
    pub offset: u64,
    pub limit: u64,
    pub length: u64,
}

impl From<CountsEnvelope> for Counts {
    fn from(c: CountsEnvelope) -> Self {
        Self {
            total: c.total,
            filtered: c.filtered,
            offset: c.offset,
            limit: c.limit,
            length: c.length,
        }
    }
}

/// Generate Relay-style connection types (Edge + Connection) with From impl.
///
/// The calling crate must depend on `async-graphql`, and `$node` must
/// implement `From<$core_model>`.
///
/// ```ignore
/// define_connection!(Task, TaskModel, TaskEdge, TaskConnection);
/// ```
#[macro_export]
macro_rules! define_connection {
    ($node:ty, $core_model:ty, $edge:ident, $connection:ident) => {
        #[derive(async_graphql::SimpleObject)]
        pub struct $edge {
            pub node: $node,
            pub cursor: String,
        }

        #[derive(async_graphql::SimpleObject)]
        pub struct $connection {
            pub edges: Vec<$edge>,
            pub nodes: Vec<$node>,
            pub page_info: $crate::PageInfo,
            pub counts: $crate::Counts,
        }

        impl From<$crate::scanql_core::ports::Connection<$core_model>> for $connection {
            fn from(conn: $crate::scanql_core::ports::Connection<$core_model>) -> Self {
                Self {
                    edges: conn
                        .edges
                        .into_iter()
                        .map(|e| $edge {
                            node: <$node>::from(e.node),
                            cursor: e.cursor.value,
                        })
                        .collect(),
                    nodes: conn.nodes.into_iter().map(<$node>::from).collect(),
                    page_info: $crate::PageInfo::from(conn.page_info),
                    counts: $crate::Counts::from(conn.counts),
                }
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Raw Result Nodes
// -----------------------------------------------------------------------------

/// One list entry as returned by the protocol.
#[derive(async_graphql::SimpleObject, Debug, Clone)]
pub struct ResultNode {
    /// Value of the entry's `id` attribute, if any.
    pub id: Option<String>,
    /// The entry's XML subtree.
    pub xml: String,
}

impl From<XmlNode> for ResultNode {
    fn from(node: XmlNode) -> Self {
        Self {
            id: node.id,
            xml: node.xml,
        }
    }
}

define_connection!(ResultNode, XmlNode, ResultNodeEdge, ResultNodeConnection);
