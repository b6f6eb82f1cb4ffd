//! Error types for the persistence and configuration layers.
//!
//! The simulation itself is infallible; only the edges that touch the
//! filesystem can fail, and callers decide whether to surface or log.

use std::io;
use thiserror::Error;

/// Failure reading or flushing the key-value preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference store I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("preference store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure loading or validating a [`GameConfig`](crate::core::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] io::Error),

    #[error("config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
