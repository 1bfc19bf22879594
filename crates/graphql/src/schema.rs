//! GraphQL schema definition.
//!
//! This module provides the generic list query over the registered sources,
//! the schema builders and the helpers shared by entity-specific resolvers.

use std::sync::Arc;

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, ObjectType, Result,
    Schema, SchemaBuilder,
};

use scanql_core::error::PaginationError;
use scanql_core::models::FilterTermString;
use scanql_core::ports::{Cursor, Pagination};

use crate::registry::SourceRegistry;
use crate::types::{ResultNodeConnection, ScanqlSchema};

// -----------------------------------------------------------------------------
// Schema Configuration
// -----------------------------------------------------------------------------

/// Maximum query depth to prevent deeply nested queries (DoS protection).
/// Note: GraphQL introspection requires depth ~13, so we use 15 to allow it.
pub const MAX_QUERY_DEPTH: usize = 15;

/// Maximum query complexity score (DoS protection).
pub const MAX_QUERY_COMPLEXITY: usize = 500;

/// Maximum length of a filter string argument.
pub const MAX_FILTER_STRING_LENGTH: usize = 1000;

// -----------------------------------------------------------------------------
// Schema Builder
// -----------------------------------------------------------------------------

/// Build the schema serving [`ListQuery`] over `registry`.
///
/// Includes query depth and complexity limits.
pub fn build_schema(registry: SourceRegistry) -> ScanqlSchema {
    build_schema_with_query(ListQuery, registry)
}

/// Create a schema builder with the source registry as data.
///
/// Use this to add more context data before finishing the schema.
/// Remember to call `.limit_depth()` and `.limit_complexity()` before `.finish()`.
///
/// # Example
///
/// ```ignore
/// use async_graphql::MergedObject;
/// use scanql_graphql::{schema_builder, ListQuery, MAX_QUERY_DEPTH, MAX_QUERY_COMPLEXITY};
///
/// #[derive(MergedObject, Default)]
/// struct Query(ListQuery, TaskQuery);
///
/// let schema = schema_builder(Query::default(), registry)
///     .data(task_pager)
///     .limit_depth(MAX_QUERY_DEPTH)
///     .limit_complexity(MAX_QUERY_COMPLEXITY)
///     .finish();
/// ```
pub fn schema_builder<Q>(
    query: Q,
    registry: SourceRegistry,
) -> SchemaBuilder<Q, EmptyMutation, EmptySubscription>
where
    Q: ObjectType + 'static,
{
    Schema::build(query, EmptyMutation, EmptySubscription).data(Arc::new(registry))
}

/// Build a schema with a custom or merged query type.
///
/// Includes query depth and complexity limits.
pub fn build_schema_with_query<Q>(
    query: Q,
    registry: SourceRegistry,
) -> Schema<Q, EmptyMutation, EmptySubscription>
where
    Q: ObjectType + 'static,
{
    schema_builder(query, registry)
        .limit_depth(MAX_QUERY_DEPTH)
        .limit_complexity(MAX_QUERY_COMPLEXITY)
        .finish()
}

// -----------------------------------------------------------------------------
// List Query
// -----------------------------------------------------------------------------

/// Query root listing any registered entity as raw protocol nodes.
///
/// Entity-specific query types can be merged next to it with
/// `#[derive(MergedObject)]`.
#[derive(Default)]
pub struct ListQuery;

#[Object]
impl ListQuery {
    /// Entity types that can be listed.
    async fn entities<'ctx>(&self, ctx: &Context<'ctx>) -> Result<Vec<String>> {
        let registry = ctx.data::<Arc<SourceRegistry>>()?;
        Ok(registry.entities())
    }

    /// List one page of an entity type.
    ///
    /// `filterString` uses the scanner's filter syntax; its `first=`/`rows=`
    /// terms are replaced when pagination arguments are given.
    #[allow(clippy::too_many_arguments)]
    async fn list<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        entity: String,
        filter_string: Option<String>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<ResultNodeConnection> {
        validate_filter_string(&filter_string, "filterString")?;

        let registry = ctx.data::<Arc<SourceRegistry>>()?;
        let pager = registry
            .get(&entity)
            .ok_or_else(|| async_graphql::Error::new(format!("Unknown entity: {}", entity)))?;

        let filter = FilterTermString::from_optional(filter_string);
        let pagination = pagination_args(first, last, after, before);

        let connection = pager
            .paginate(&filter, &pagination)
            .await
            .map_err(graphql_error)?;

        Ok(ResultNodeConnection::from(connection))
    }
}

// -----------------------------------------------------------------------------
// Helpers & Validation
// -----------------------------------------------------------------------------

/// Collect Relay connection arguments.
///
/// Values are passed through unchecked; the window calculation rejects
/// unusable combinations.
pub fn pagination_args(
    first: Option<i32>,
    last: Option<i32>,
    after: Option<String>,
    before: Option<String>,
) -> Pagination {
    Pagination {
        first,
        after: after.map(Cursor::from),
        last,
        before: before.map(Cursor::from),
    }
}

/// Validate a filter string argument.
pub fn validate_filter_string(s: &Option<String>, field_name: &str) -> Result<()> {
    if let Some(value) = s {
        if value.len() > MAX_FILTER_STRING_LENGTH {
            return Err(async_graphql::Error::new(format!(
                "{} too long: maximum {} characters allowed",
                field_name, MAX_FILTER_STRING_LENGTH
            )));
        }
        if value.chars().any(char::is_control) {
            return Err(async_graphql::Error::new(format!(
                "{} must not contain control characters",
                field_name
            )));
        }
    }
    Ok(())
}

/// Convert a pagination error into a GraphQL error carrying
/// `extensions.code`.
pub fn graphql_error(err: PaginationError) -> async_graphql::Error {
    let code = err.code();
    async_graphql::Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use scanql_core::error::{UpstreamError, UpstreamResult};
    use scanql_core::pagination::encode_cursor;
    use scanql_gmp::{GmpListSource, GmpTransport};

    // Tests de validation critiques - protègent contre les injections/DoS

    #[test]
    fn test_validate_filter_string_boundaries() {
        // Vide = OK (pas de filtre)
        assert!(validate_filter_string(&Some("".into()), "x").is_ok());
        assert!(validate_filter_string(&Some("x".repeat(MAX_FILTER_STRING_LENGTH)), "x").is_ok());
        // Trop long = erreur (DoS prevention)
        assert!(validate_filter_string(&Some("x".repeat(1001)), "x").is_err());
        // Caractères de contrôle = erreur
        assert!(validate_filter_string(&Some("name=a\nrows=5".into()), "x").is_err());
        assert!(validate_filter_string(&Some("a\u{0}".into()), "x").is_err());
        // None = OK (optionnel)
        assert!(validate_filter_string(&None, "x").is_ok());
    }

    #[test]
    fn test_pagination_args_wraps_cursors() {
        let p = pagination_args(Some(5), None, Some("abc".into()), None);
        assert_eq!(p.first, Some(5));
        assert_eq!(p.after, Some(Cursor::from("abc".to_string())));
        assert!(p.last.is_none());
        assert!(p.before.is_none());
    }

    #[test]
    fn test_graphql_error_codes() {
        let cases = [
            (PaginationError::InvalidCursor("x".into()), "INVALID_CURSOR"),
            (
                PaginationError::InvalidPaginationArgument("x".into()),
                "INVALID_PAGINATION_ARGUMENT",
            ),
            (
                PaginationError::from(UpstreamError::RequestFailed("x".into())),
                "UPSTREAM_FAILURE",
            ),
        ];

        for (err, code) in cases {
            let message = err.to_string();
            let gql = graphql_error(err);
            assert_eq!(gql.message, message);
            let ext = serde_json::to_value(gql.extensions.unwrap()).unwrap();
            assert_eq!(ext["code"], code);
        }
    }

    // Tests de bout en bout : schéma -> pager -> adaptateur -> transport factice

    /// Serves `total` tasks, honouring the `first=`/`rows=` terms of the
    /// command's filter.
    struct TaskTransport {
        total: u64,
        sent: Mutex<Vec<String>>,
    }

    impl TaskTransport {
        fn new(total: u64) -> Arc<Self> {
            Arc::new(Self {
                total,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    fn term(command: &str, keyword: &str) -> Option<u64> {
        let start = command.find(&format!("{}=", keyword))? + keyword.len() + 1;
        command[start..]
            .split(|c: char| !c.is_ascii_digit())
            .next()?
            .parse()
            .ok()
    }

    #[async_trait]
    impl GmpTransport for TaskTransport {
        async fn send(&self, command: &str) -> UpstreamResult<String> {
            self.sent.lock().unwrap().push(command.to_string());

            let first = term(command, "first").unwrap_or(1);
            let rows = term(command, "rows").unwrap_or(10);
            let offset = first - 1;

            let mut xml = String::from(r#"<get_tasks_response status="200" status_text="OK">"#);
            for i in offset..self.total.min(offset + rows) {
                xml.push_str(&format!(r#"<task id="task-{i}"><name>Scan {i}</name></task>"#));
            }
            xml.push_str(&format!(
                r#"<tasks start="{first}" max="{rows}"/><task_count>{total}<filtered>{total}</filtered></task_count></get_tasks_response>"#,
                total = self.total
            ));
            Ok(xml)
        }
    }

    fn schema(transport: Arc<TaskTransport>) -> ScanqlSchema {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(GmpListSource::for_entity(transport, "task")));
        build_schema(registry)
    }

    async fn run(schema: &ScanqlSchema, query: &str) -> serde_json::Value {
        serde_json::to_value(schema.execute(query).await).unwrap()
    }

    #[tokio::test]
    async fn test_entities_lists_registered_sources() {
        let schema = schema(TaskTransport::new(0));
        let res = run(&schema, "{ entities }").await;
        assert_eq!(res["data"], json!({ "entities": ["task"] }));
    }

    #[tokio::test]
    async fn test_first_page_then_follow_end_cursor() {
        let transport = TaskTransport::new(5);
        let schema = schema(transport.clone());

        let res = run(
            &schema,
            r#"{ list(entity: "task", first: 2) {
                edges { cursor node { id } }
                pageInfo { hasNextPage hasPreviousPage endCursor }
                counts { total filtered offset limit length }
            } }"#,
        )
        .await;

        let list = &res["data"]["list"];
        assert_eq!(list["edges"][0]["node"]["id"], "task-0");
        assert_eq!(list["edges"][0]["cursor"], encode_cursor("task", 0).value);
        assert_eq!(list["edges"][1]["node"]["id"], "task-1");
        assert_eq!(list["pageInfo"]["hasNextPage"], true);
        assert_eq!(list["pageInfo"]["hasPreviousPage"], false);
        assert_eq!(
            list["counts"],
            json!({ "total": 5, "filtered": 5, "offset": 0, "limit": 2, "length": 2 })
        );

        let end_cursor = list["pageInfo"]["endCursor"].as_str().unwrap().to_string();
        let res = run(
            &schema,
            &format!(
                r#"{{ list(entity: "task", first: 10, after: "{}") {{
                    nodes {{ id }}
                    pageInfo {{ hasNextPage hasPreviousPage }}
                }} }}"#,
                end_cursor
            ),
        )
        .await;

        let list = &res["data"]["list"];
        assert_eq!(
            list["nodes"],
            json!([{ "id": "task-2" }, { "id": "task-3" }, { "id": "task-4" }])
        );
        assert_eq!(list["pageInfo"]["hasNextPage"], false);
        assert_eq!(list["pageInfo"]["hasPreviousPage"], true);

        assert_eq!(
            transport.sent(),
            vec![
                r#"<get_tasks filter="first=1 rows=2"/>"#,
                r#"<get_tasks filter="first=3 rows=10"/>"#,
            ]
        );
    }

    #[tokio::test]
    async fn test_filter_terms_are_rewritten() {
        let transport = TaskTransport::new(30);
        let schema = schema(transport.clone());

        let res = run(
            &schema,
            &format!(
                r#"{{ list(entity: "task", filterString: "name~scan rows=100 first=50", last: 5, before: "{}") {{
                    nodes {{ id }}
                }} }}"#,
                encode_cursor("task", 20).value
            ),
        )
        .await;

        assert_eq!(res["data"]["list"]["nodes"][0]["id"], "task-15");
        assert_eq!(
            transport.sent(),
            vec![r#"<get_tasks filter="name~scan rows=5 first=16"/>"#]
        );
    }

    // Test critique: un curseur invalide ne doit jamais atteindre le scanner
    #[tokio::test]
    async fn test_invalid_cursor_is_typed_error() {
        let transport = TaskTransport::new(5);
        let schema = schema(transport.clone());

        let res = run(
            &schema,
            r#"{ list(entity: "task", first: 2, after: "not a cursor") { nodes { id } } }"#,
        )
        .await;

        assert_eq!(res["errors"][0]["extensions"]["code"], "INVALID_CURSOR");
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_negative_first_is_typed_error() {
        let schema = schema(TaskTransport::new(5));
        let res = run(&schema, r#"{ list(entity: "task", first: -1) { nodes { id } } }"#).await;
        assert_eq!(
            res["errors"][0]["extensions"]["code"],
            "INVALID_PAGINATION_ARGUMENT"
        );
    }

    #[tokio::test]
    async fn test_unknown_entity_is_rejected() {
        let schema = schema(TaskTransport::new(5));
        let res = run(&schema, r#"{ list(entity: "host") { nodes { id } } }"#).await;
        assert_eq!(res["errors"][0]["message"], "Unknown entity: host");
    }

    #[tokio::test]
    async fn test_filter_string_too_long_is_rejected() {
        let transport = TaskTransport::new(5);
        let schema = schema(transport.clone());

        let res = run(
            &schema,
            &format!(
                r#"{{ list(entity: "task", filterString: "{}") {{ nodes {{ id }} }} }}"#,
                "x".repeat(MAX_FILTER_STRING_LENGTH + 1)
            ),
        )
        .await;

        assert!(res["errors"][0]["message"]
            .as_str()
            .unwrap()
            .starts_with("filterString too long"));
        assert!(transport.sent().is_empty());
    }
}
