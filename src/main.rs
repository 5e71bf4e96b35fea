mod alerts;
mod assignments;
mod config;
mod db;
mod error;
mod geo;
mod http;
mod missions;
mod models;
mod scheduling;
mod store;

use std::sync::Arc;

use config::AppConfig;
use store::{PgFleetStore, SharedStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .init();

    info!("Starting Siscom Fleet Service...");

    // Init DB
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    info!("Connected to database");

    // Serve HTTP
    let store: SharedStore = Arc::new(PgFleetStore::new(pool));
    let app = http::router(store);
    let addr = format!("{}:{}", config.http_host, config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
