//! Error types for the REST API

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::engine::ModelError;

use super::dto::{ErrorResponse, FieldErrorDto};

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Expected request with `Content-Type: application/json`")]
    UnsupportedMediaType,

    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Request validation failed")]
    Validation(Vec<FieldError>),

    #[error("Request rejected: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Request timed out after {0}s")]
    RequestTimeout(u64),

    #[error("Inference error: {0}")]
    Inference(#[from] ModelError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::InvalidJson(_) | ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected { status, .. } => *status,
            ApiError::RequestTimeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::Rejected { .. } => "REQUEST_REJECTED",
            ApiError::RequestTimeout(_) => "REQUEST_TIMEOUT",
            ApiError::Inference(_) => "INFERENCE_FAILED",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType,
            JsonRejection::JsonSyntaxError(e) => ApiError::InvalidJson(e.body_text()),
            JsonRejection::JsonDataError(e) => ApiError::InvalidJson(e.body_text()),
            other => ApiError::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(fields) => ErrorResponse::new(&self.to_string(), self.code())
                .with_fields(
                    fields
                        .iter()
                        .map(|f| FieldErrorDto {
                            field: f.field.to_string(),
                            message: f.message.to_string(),
                        })
                        .collect(),
                ),
            ApiError::Inference(e) => {
                tracing::error!(detail = %e, "Inference failed");
                ErrorResponse::new("Prediction failed. Check server logs for details.", self.code())
            }
            _ => ErrorResponse::new(&self.to_string(), self.code()),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
