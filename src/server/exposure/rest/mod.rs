//! REST exposure: health checks and caller-supplied routes
//!
//! All catalog operations go through GraphQL; the REST side only carries
//! liveness endpoints for load balancers and any custom routes.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// Returns health check routes merged with every router in
    /// `custom_routes`.
    pub fn build_router(custom_routes: Vec<Router>) -> Router {
        custom_routes
            .into_iter()
            .fold(Self::health_routes(), |app, custom| app.merge(custom))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "catalog-store"
        }))
    }
}
