//! Service layer module

pub mod prediction_service;
pub mod types;

pub use prediction_service::PredictionService;
pub use types::*;
