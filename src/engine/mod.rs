//! Inference engine module
//!
//! Provides the model side of the service:
//! - JSON decision tree artifact loading and validation
//! - A read-only `Classifier` shared across requests

pub mod artifact;
pub mod classifier;
pub mod error;

pub use artifact::{ModelArtifact, TreeNode, FEATURE_NAMES};
pub use classifier::{Classifier, DecisionTreeClassifier, ModelInfo};
pub use error::ModelError;
