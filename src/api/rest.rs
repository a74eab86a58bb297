//! Axum REST API handlers

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::engine::Classifier;
use crate::service::PredictionService;

use super::dto::*;
use super::error::{ApiError, Result};
use super::validate;

/// Application state shared across handlers
pub struct AppState<C: Classifier> {
    pub service: Arc<PredictionService<C>>,
    pub start_time: Instant,
}

impl<C: Classifier> AppState<C> {
    pub fn new(service: Arc<PredictionService<C>>) -> Self {
        Self {
            service,
            start_time: Instant::now(),
        }
    }
}

/// Abort requests that run past `limit`, answering with the JSON error body
async fn request_timeout(State(limit): State<Duration>, request: Request, next: Next) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(limit_secs = limit.as_secs(), "Request timed out");
            ApiError::RequestTimeout(limit.as_secs()).into_response()
        }
    }
}

/// Create the REST API router
pub fn create_rest_router<C: Classifier>(state: Arc<AppState<C>>, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/predict", post(predict_handler::<C>))
        .route("/health", get(health_handler::<C>))
        // Middleware
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(middleware::from_fn_with_state(
            Duration::from_secs(server.request_timeout_secs),
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Service banner
async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Iris API is up and running".to_string(),
    })
}

/// Classify one Iris flower
async fn predict_handler<C: Classifier>(
    State(state): State<Arc<AppState<C>>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>> {
    let Json(body) = payload.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "Rejected predict request body");
        ApiError::from(rejection)
    })?;

    let features = validate::feature_vector(&body).map_err(|e| {
        if let ApiError::Validation(fields) = &e {
            let names: Vec<&str> = fields.iter().map(|f| f.field).collect();
            warn!(fields = ?names, "Predict request failed validation");
        }
        e
    })?;
    debug!(?features, "Predict request accepted");

    let result = state.service.predict(features).await?;

    Ok(Json(PredictResponse {
        prediction: result.labels,
    }))
}

/// Readiness and liveness check
async fn health_handler<C: Classifier>(State(state): State<Arc<AppState<C>>>) -> Json<HealthResponse> {
    let health = state.service.health();

    Json(HealthResponse {
        healthy: health.healthy,
        version: health.version,
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: health.model,
    })
}
