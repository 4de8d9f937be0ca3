//! Catalog server binary
//!
//! Reads configuration from `CATALOG_CONFIG` (YAML) and the
//! `CATALOG_DATA_DIR` / `CATALOG_BIND_ADDR` overrides, then serves:
//! - `POST /graphql`, `GET /graphql/schema`, `GET /graphql/playground`
//! - `GET /health`, `GET /healthz`

use anyhow::Result;
use catalog::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog=info,tower_http=info")),
        )
        .init();

    let config = CatalogConfig::load()?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        bind_addr = %config.bind_addr,
        "starting catalog server"
    );

    ServerBuilder::new().with_config(config).serve().await
}
