//! Decision tree classifier
//!
//! Evaluates a validated [`ModelArtifact`] against rows of features.

use std::path::Path;

use ndarray::{ArrayView1, ArrayView2};
use serde::Serialize;

use super::artifact::{ModelArtifact, TreeNode};
use super::error::ModelError;

/// Summary of the loaded model, exposed on the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub labels: Vec<String>,
}

/// A read-only classifier shared across request handlers
pub trait Classifier: Send + Sync + 'static {
    /// Predict one label per row of `x`
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Vec<String>, ModelError>;

    /// Describe the loaded model
    fn info(&self) -> ModelInfo;
}

pub struct DecisionTreeClassifier {
    artifact: ModelArtifact,
}

impl DecisionTreeClassifier {
    /// Load and validate the artifact at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        ModelArtifact::read(path).and_then(Self::from_artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    pub fn n_features(&self) -> usize {
        self.artifact.features.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.artifact.n_leaves()
    }

    fn predict_row(&self, row: ArrayView1<'_, f64>) -> Result<&str, ModelError> {
        let mut node = &self.artifact.root;
        loop {
            match node {
                TreeNode::Leaf { class } => {
                    return self
                        .artifact
                        .labels
                        .get(*class)
                        .map(String::as_str)
                        .ok_or_else(|| ModelError::Inference(format!("leaf class {} has no label", class)));
                }
                TreeNode::Split { feature, threshold, left, right } => {
                    let value = row.get(*feature).ok_or(ModelError::ShapeMismatch {
                        expected: feature + 1,
                        actual: row.len(),
                    })?;
                    node = if *value <= *threshold { &**left } else { &**right };
                }
            }
        }
    }
}

impl Classifier for DecisionTreeClassifier {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Vec<String>, ModelError> {
        if x.ncols() != self.n_features() {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features(),
                actual: x.ncols(),
            });
        }

        x.rows()
            .into_iter()
            .map(|row| self.predict_row(row).map(str::to_string))
            .collect()
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.artifact.name.clone(),
            version: self.artifact.version.clone(),
            labels: self.artifact.labels.clone(),
        }
    }
}
