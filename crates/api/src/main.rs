use std::sync::Arc;

use anyhow::Context;

use stockyard_api::config::{self, ApiConfig};
use stockyard_inventory::InventoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockyard_observability::init(config::log_format_from_env());

    let config = ApiConfig::from_env();
    let store = Arc::new(InventoryStore::new(config.departments.clone()));
    let app = stockyard_api::app::build_app(store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        departments = config.departments.names().len(),
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
