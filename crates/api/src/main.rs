use std::sync::Arc;

use anyhow::Context;

use catalog_api::config::{self, ApiConfig};
use catalog_products::ProductCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = config::load_env_file();
    catalog_observability::init();
    match &env_file {
        Some(path) => tracing::info!(path = %path.display(), "loaded environment file"),
        None => tracing::debug!("no .env file found; using process environment"),
    }

    let config = ApiConfig::from_env();
    let catalog = Arc::new(ProductCatalog::seeded(config.catalog));
    let app = catalog_api::app::build_app(&config, catalog);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        cors_origin = ?config.cors_origin,
        required_fields = config.catalog.required_fields.as_str(),
        update_policy = config.catalog.update_policy.as_str(),
        "listening"
    );

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
