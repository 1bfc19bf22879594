//! GraphQL HTTP server.

use std::future::Future;

use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptyMutation, EmptySubscription, ObjectType, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use tracing::{debug, info};

use scanql_core::metrics::init_metrics;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default GraphQL port.
pub const DEFAULT_PORT: u16 = 4000;

/// Server configuration.
///
/// Every field can be set from the command line or the environment. A host
/// binary embeds it with `#[command(flatten)]`.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "scanql")]
pub struct ServerConfig {
    /// GraphQL server bind address.
    #[arg(long = "graphql-host", env = "GRAPHQL_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// GraphQL server port.
    #[arg(long = "graphql-port", env = "GRAPHQL_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Serve GraphiQL on `/` (true/false, yes/no, on/off, 1/0).
    #[arg(
        long = "graphql-playground",
        env = "GRAPHQL_PLAYGROUND",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub enable_playground: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            enable_playground: true,
        }
    }
}

impl ServerConfig {
    /// Read `GRAPHQL_HOST`, `GRAPHQL_PORT` and `GRAPHQL_PLAYGROUND`, loading
    /// a `.env` file first when one exists.
    ///
    /// Unset values keep their defaults. Invalid values are an error.
    pub fn from_env() -> Result<Self, clap::Error> {
        dotenvy::dotenv().ok();
        Self::try_parse_from(["scanql"])
    }

    fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Build the HTTP router for a schema.
///
/// - `POST /graphql` executes queries
/// - `GET /graphql` serves GraphiQL
/// - `GET /health` answers `OK`
/// - `GET /` serves GraphiQL when the playground is enabled
pub fn router<Q>(
    schema: Schema<Q, EmptyMutation, EmptySubscription>,
    config: &ServerConfig,
) -> Router
where
    Q: ObjectType + 'static,
{
    let mut app = Router::new()
        .route("/graphql", get(graphql_playground).post(graphql_handler::<Q>))
        .route("/health", get(health_check))
        .with_state(schema);

    if config.enable_playground {
        app = app.route("/", get(graphql_playground));
    }

    app
}

/// Start the GraphQL server with any schema type.
pub async fn serve<Q>(
    schema: Schema<Q, EmptyMutation, EmptySubscription>,
    config: ServerConfig,
) -> Result<(), std::io::Error>
where
    Q: ObjectType + 'static,
{
    init_metrics();
    let app = router(schema, &config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("⚡ GraphQL server listening on http://{}", addr);

    axum::serve(listener, app).await
}

/// Start the GraphQL server with graceful shutdown support.
pub async fn serve_with_shutdown<Q, F>(
    schema: Schema<Q, EmptyMutation, EmptySubscription>,
    config: ServerConfig,
    shutdown_signal: F,
) -> Result<(), std::io::Error>
where
    Q: ObjectType + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    init_metrics();
    let app = router(schema, &config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("⚡ GraphQL server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    debug!(addr = %addr, "Server stopped");
    Ok(())
}

/// GraphQL query handler.
async fn graphql_handler<Q>(
    State(schema): State<Schema<Q, EmptyMutation, EmptySubscription>>,
    req: GraphQLRequest,
) -> GraphQLResponse
where
    Q: ObjectType + 'static,
{
    schema.execute(req.into_inner()).await.into()
}

/// GraphQL Playground UI.
async fn graphql_playground() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
