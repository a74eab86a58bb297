//! Service lifecycle
//!
//! Loading: read and validate the model artifact. Ready: bind and serve.
//! A failure while loading returns before any socket is bound.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::{create_rest_router, AppState};
use crate::config::Config;
use crate::engine::{Classifier, DecisionTreeClassifier};
use crate::service::PredictionService;

/// Load the model named by the config and build the router around it
pub fn build_app(config: &Config) -> Result<Router> {
    let path = &config.model.path;
    info!(path = %path.display(), "Loading model");

    let classifier = DecisionTreeClassifier::load(path)
        .with_context(|| format!("model unavailable at {}", path.display()))?;
    let info = classifier.info();
    info!(
        name = %info.name,
        version = %info.version,
        labels = ?info.labels,
        leaves = classifier.n_leaves(),
        "Model loaded"
    );

    let service = Arc::new(PredictionService::new(Arc::new(classifier)));
    let state = Arc::new(AppState::new(service));
    Ok(create_rest_router(state, &config.server))
}

/// Run the service until a shutdown signal arrives
pub async fn run(config: Config) -> Result<()> {
    let app = build_app(&config)?;

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let local_addr = listener.local_addr()?;
    info!(address = %local_addr, pid = std::process::id(), "Iris prediction service is ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}

/// Resolve on ctrl-c or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install ctrl-c handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received, stopping server gracefully");
}
