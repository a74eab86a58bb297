//! Iris Prediction Service
//!
//! Loads a pre-trained Iris classifier at startup and serves
//! `POST /predict` over HTTP (Axum).

use anyhow::{Context, Result};
use tracing::info;

use iris_serve::config::Config;
use iris_serve::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iris_serve=info,tower_http=info".into()),
        )
        .with_target(false)
        .init();

    info!("Starting Iris Prediction Service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = Config::resolve_path();
    let config = Config::load_or_default(&config_path)
        .and_then(Config::apply_env)
        .with_context(|| format!("invalid configuration ({})", config_path.display()))?;

    info!("Configuration loaded:");
    info!("  Bind address: {}", config.bind_address());
    info!("  Model path: {}", config.model.path.display());
    info!("  Request timeout: {}s", config.server.request_timeout_secs);
    info!("  Max body size: {} bytes", config.server.max_body_bytes);

    server::run(config).await
}
