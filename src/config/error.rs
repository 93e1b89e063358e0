//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Upload limit must be greater than zero")]
    InvalidUploadLimit,

    #[error("Upstream URL must use http or https: {0}")]
    InvalidUpstreamUrl(String),

    #[error("Upstream model must not be empty")]
    MissingModel,

    #[error("Invalid upstream timeout")]
    InvalidTimeout,
}
