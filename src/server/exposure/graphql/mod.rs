//! GraphQL API exposure
//!
//! Serves the typed schema over HTTP. The schema itself lives in [`schema`];
//! this module only wires it into axum.

mod schema;
pub mod types;

pub use schema::{CatalogSchema, MutationRoot, QueryRoot, build_schema};

use crate::server::host::CatalogHost;
use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::Extension,
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::sync::Arc;

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the executable schema for a host
    pub fn build_schema(host: Arc<CatalogHost>) -> CatalogSchema {
        build_schema(host)
    }

    /// Build the GraphQL router from a host
    ///
    /// Routes:
    /// - `POST /graphql` executes queries and mutations
    /// - `GET /graphql/schema` returns the SDL
    /// - `GET /graphql/playground` serves the playground, when enabled
    pub fn build_router(host: Arc<CatalogHost>) -> Router {
        let playground = host.config.playground;
        let schema = build_schema(host);

        let mut router = Router::new()
            .route("/graphql", post(graphql_handler))
            .route("/graphql/schema", get(graphql_sdl));

        if playground {
            router = router.route("/graphql/playground", get(graphql_playground));
        }

        router.layer(Extension(schema))
    }
}

async fn graphql_handler(
    Extension(schema): Extension<CatalogSchema>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

async fn graphql_sdl(Extension(schema): Extension<CatalogSchema>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        schema.sdl(),
    )
}
