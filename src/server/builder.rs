//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::{GraphQLExposure, RestExposure};
use super::host::CatalogHost;
use crate::config::CatalogConfig;
use crate::core::model::{Cart, Product};
use crate::core::store::RecordStore;
use anyhow::Result;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for creating the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(CatalogConfig::load()?)
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: CatalogConfig,
    stores: Option<(Arc<dyn RecordStore<Cart>>, Arc<dyn RecordStore<Product>>)>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            config: CatalogConfig::default(),
            stores: None,
            custom_routes: Vec::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep the configuration but store records under `data_dir`
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = data_dir.into();
        self
    }

    /// Use explicit stores instead of JSON files under the data directory
    pub fn with_stores(
        mut self,
        carts: Arc<dyn RecordStore<Cart>>,
        products: Arc<dyn RecordStore<Product>>,
    ) -> Self {
        self.stores = Some((carts, products));
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<CatalogHost> {
        match self.stores.take() {
            Some((carts, products)) => {
                self.config.validate()?;
                Ok(CatalogHost::from_stores(
                    self.config.clone(),
                    carts,
                    products,
                ))
            }
            None => CatalogHost::open(self.config.clone()),
        }
    }

    /// Build the final router: health routes, GraphQL, custom routes
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);

        let app = RestExposure::build_router(custom_routes)
            .merge(GraphQLExposure::build_router(host))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        Ok(app)
    }

    /// Serve the application on the configured address with graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
