//! Prediction Service - Core business logic
//!
//! Turns a validated feature vector into a single-label prediction.

use std::sync::Arc;
use std::time::Instant;

use ndarray::arr2;
use tracing::debug;

use crate::engine::{Classifier, ModelError};

use super::types::*;

/// Prediction service over a shared, read-only classifier
pub struct PredictionService<C: Classifier> {
    classifier: Arc<C>,
}

impl<C: Classifier> PredictionService<C> {
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Classify one feature vector
    pub async fn predict(&self, features: FeatureVector) -> Result<PredictionResult, ModelError> {
        let start = Instant::now();

        // Run inference in blocking task
        let classifier = self.classifier.clone();
        let labels = tokio::task::spawn_blocking(move || {
            let x = arr2(&[features.to_array()]);
            classifier.predict(x.view())
        })
        .await
        .map_err(|e| ModelError::Inference(format!("inference task failed: {}", e)))??;

        if labels.len() != 1 {
            return Err(ModelError::Inference(format!(
                "expected 1 label for 1 row, got {}",
                labels.len()
            )));
        }

        debug!(
            label = %labels[0],
            elapsed_us = start.elapsed().as_micros() as u64,
            "Prediction complete"
        );

        Ok(PredictionResult { labels })
    }

    pub fn health(&self) -> HealthResult {
        HealthResult {
            healthy: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: self.classifier.info(),
        }
    }
}
