//! REST API request/response data transfer objects

use serde::Serialize;

use crate::engine::ModelInfo;

/// Predict response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: Vec<String>,
}

/// Root banner
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelInfo,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldErrorDto>,
}

impl ErrorResponse {
    pub fn new(error: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            code: code.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldErrorDto>) -> Self {
        self.fields = fields;
        self
    }
}

/// One rejected request field
#[derive(Debug, Clone, Serialize)]
pub struct FieldErrorDto {
    pub field: String,
    pub message: String,
}
