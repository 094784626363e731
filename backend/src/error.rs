//! Error handling for the Mandi Advisor backend
//!
//! Collaborator failures are `FetchError`s and are always resolved to a
//! fallback before the engine runs. `AppError` is what the binary can fail with.

use std::time::Duration;

use shared::EngineError;
use thiserror::Error;

/// Failure of an upstream collaborator (HTTP API, directory, report store)
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    #[error("Failed to decode {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for collaborator calls
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
