//! Errors from setting up the client layer.

use thiserror::Error;

use crate::config::ConfigError;

/// Failure to build services or state from configuration.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The shared HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
