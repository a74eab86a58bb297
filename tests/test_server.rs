//! Integration test: lifecycle and system endpoints

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use iris_serve::config::Config;
use iris_serve::server::build_app;
use tempfile::tempdir;
use tower::ServiceExt;

fn config_with_model(path: PathBuf) -> Config {
    let mut config = Config::default();
    config.model.path = path;
    config
}

fn shipped_config() -> Config {
    config_with_model(PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/models/iris_tree.json")))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
}

#[tokio::test]
async fn test_root_banner() {
    let app = build_app(&shipped_config()).unwrap();
    let (status, json) = get_json(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Iris API is up and running");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_app(&shipped_config()).unwrap();
    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["healthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["model"]["name"], "iris-decision-tree");
    assert_eq!(
        json["model"]["labels"],
        serde_json::json!(["setosa", "versicolor", "virginica"])
    );
    assert!(json["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = build_app(&shipped_config()).unwrap();
    let (status, _) = get_json(app, "/api/v1/predict").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn test_missing_model_blocks_startup() {
    let dir = tempdir().unwrap();
    let err = build_app(&config_with_model(dir.path().join("model.joblib"))).unwrap_err();
    assert!(format!("{:#}", err).contains("model unavailable"));
}

#[test]
fn test_corrupt_model_blocks_startup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, "not a model").unwrap();
    assert!(build_app(&config_with_model(path)).is_err());
}

#[test]
fn test_invalid_model_blocks_startup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    let artifact = serde_json::json!({
        "name": "bad",
        "version": "1",
        "features": ["sepal_length", "sepal_width", "petal_length", "petal_width"],
        "labels": ["setosa"],
        "root": {"leaf": {"class": 3}}
    });
    std::fs::write(&path, artifact.to_string()).unwrap();

    let err = build_app(&config_with_model(path)).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid model artifact"));
}
