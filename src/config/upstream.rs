//! Upstream model configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::upstream::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Where and how the relay reaches the language-model API
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Full endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Client-side timeout in seconds; unset waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate upstream configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUpstreamUrl(self.base_url.clone()));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingModel);
        }
        if let Some(secs) = self.timeout_secs {
            if secs == 0 || secs > 600 {
                return Err(ValidationError::InvalidTimeout);
            }
        }
        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
