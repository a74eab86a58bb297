//! Iris Prediction Service Library

pub mod api;
pub mod config;
pub mod engine;
pub mod server;
pub mod service;

pub use config::Config;
