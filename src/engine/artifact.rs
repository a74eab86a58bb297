//! Model artifact format
//!
//! A fitted decision tree serialized as JSON, together with the feature
//! order it was trained on and the label set its leaves index into.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ModelError;

/// Feature columns in the order the model expects them
pub const FEATURE_NAMES: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Deepest tree accepted at load time
pub const MAX_TREE_DEPTH: usize = 64;

/// Decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Terminal node, `class` indexes into the artifact labels
    Leaf { class: usize },
    /// Go `left` when `x[feature] <= threshold`, otherwise `right`
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Serialized classifier as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub version: String,
    pub features: Vec<String>,
    pub labels: Vec<String>,
    pub root: TreeNode,
}

impl ModelArtifact {
    /// Read an artifact from disk without validating it
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&content).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the artifact is something the service can evaluate without
    /// failing at request time.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.features.len() != FEATURE_NAMES.len()
            || self.features.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b)
        {
            return Err(ModelError::Invalid(format!(
                "expected features {:?}, found {:?}",
                FEATURE_NAMES, self.features
            )));
        }

        if self.labels.is_empty() {
            return Err(ModelError::Invalid("label set is empty".to_string()));
        }
        let mut seen = HashSet::new();
        for label in &self.labels {
            if !seen.insert(label.as_str()) {
                return Err(ModelError::Invalid(format!("duplicate label {:?}", label)));
            }
        }

        // Iterative walk so a hostile artifact cannot blow the stack here
        let mut stack = vec![(&self.root, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            if depth > MAX_TREE_DEPTH {
                return Err(ModelError::Invalid(format!(
                    "tree deeper than {} levels",
                    MAX_TREE_DEPTH
                )));
            }
            match node {
                TreeNode::Leaf { class } => {
                    if *class >= self.labels.len() {
                        return Err(ModelError::Invalid(format!(
                            "leaf class {} out of range for {} labels",
                            class,
                            self.labels.len()
                        )));
                    }
                }
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= self.features.len() {
                        return Err(ModelError::Invalid(format!(
                            "split on feature {} out of range for {} features",
                            feature,
                            self.features.len()
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::Invalid(format!(
                            "non-finite threshold on feature {}",
                            feature
                        )));
                    }
                    stack.push((&**left, depth + 1));
                    stack.push((&**right, depth + 1));
                }
            }
        }

        Ok(())
    }

    /// Number of leaves in the tree
    pub fn n_leaves(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf { .. } => count += 1,
                TreeNode::Split { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        count
    }
}
