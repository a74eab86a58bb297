//! API module - REST handlers

pub mod dto;
pub mod error;
pub mod rest;
pub mod validate;

pub use error::ApiError;
pub use rest::{create_rest_router, AppState};
