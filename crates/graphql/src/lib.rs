//! GraphQL API for scanql.
//!
//! Exposes the scanner's list commands as Relay connections. Every
//! registered source can be listed as raw XML nodes through
//! [`ListQuery`]; typed entity resolvers can build their own connections
//! with [`define_connection!`] and the helpers below.
//!
//! # Building a Schema with Extensions
//!
//! ```ignore
//! use async_graphql::MergedObject;
//! use scanql_graphql::{build_schema_with_query, ListQuery, SourceRegistry};
//!
//! #[derive(MergedObject, Default)]
//! struct Query(ListQuery, TaskQuery);
//!
//! let mut registry = SourceRegistry::new();
//! registry.register(Arc::new(GmpListSource::for_entity(transport, "task")));
//!
//! let schema = build_schema_with_query(Query::default(), registry);
//! ```
//!
//! A typed resolver follows the same steps as [`ListQuery`]:
//!
//! ```ignore
//! validate_filter_string(&filter_string, "filterString")?;
//! let pagination = pagination_args(first, last, after, before);
//! let connection = pager
//!     .paginate(&FilterTermString::from_optional(filter_string), &pagination)
//!     .await
//!     .map_err(graphql_error)?;
//! Ok(TaskConnection::from(connection))
//! ```

mod registry;
mod schema;
mod server;
mod types;

pub use scanql_core;

pub use registry::{SourceRegistry, XmlPager};
pub use schema::{
    ListQuery, MAX_FILTER_STRING_LENGTH, MAX_QUERY_COMPLEXITY, MAX_QUERY_DEPTH, build_schema,
    build_schema_with_query, graphql_error, pagination_args, schema_builder,
    validate_filter_string,
};
pub use server::{ServerConfig, router, serve, serve_with_shutdown};
pub use types::{
    Counts, PageInfo, ResultNode, ResultNodeConnection, ResultNodeEdge, ScanqlSchema,
};
