//! OnlySq Provider - Implementation of UpstreamModel for the OnlySq API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OnlySqConfig::new()
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let provider = OnlySqProvider::new(config)?;
//! ```
//!
//! # Wire format
//!
//! One `POST` with a JSON body `{model, request: {messages, meta?}}`. The
//! reply body is decoded as JSON and classified into [`UpstreamReply`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::domain::relay::UpstreamReply;
use crate::ports::{UpstreamError, UpstreamModel, UpstreamRequest};

/// Default endpoint of the OnlySq completion API.
pub const DEFAULT_BASE_URL: &str = "https://api.onlysq.ru/ai/v2";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the OnlySq provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlySqConfig {
    /// Full endpoint URL.
    pub base_url: String,
    /// Model placed in every request.
    pub model: String,
    /// Client-side timeout. `None` waits as long as the connection lives.
    pub timeout: Option<Duration>,
}

impl Default for OnlySqConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OnlySqConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the endpoint URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl From<&UpstreamConfig> for OnlySqConfig {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            timeout: config.timeout(),
        }
    }
}

/// OnlySq API provider implementation.
pub struct OnlySqProvider {
    config: OnlySqConfig,
    client: Client,
}

impl OnlySqProvider {
    /// Creates a provider, building the underlying HTTP client.
    pub fn new(config: OnlySqConfig) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UpstreamError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn map_send_error(&self, e: reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::Timeout {
                timeout_secs: self.config.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }
        } else if e.is_connect() {
            UpstreamError::network(format!("Connection failed: {}", e))
        } else {
            UpstreamError::network(e.to_string())
        }
    }

    /// Classifies a reply by status and body.
    ///
    /// A non-success status is only passed through as a reply when the body
    /// is an error-flagged object; anything else becomes `Rejected`.
    fn interpret(status: StatusCode, body: &[u8]) -> Result<UpstreamReply, UpstreamError> {
        let parsed = serde_json::from_slice::<serde_json::Value>(body);

        if !status.is_success() {
            return match parsed.map(|value| UpstreamReply::classify(&value)) {
                Ok(reply @ UpstreamReply::Error { .. }) => Ok(reply),
                _ => Err(UpstreamError::Rejected {
                    status: status.as_u16(),
                }),
            };
        }

        let value =
            parsed.map_err(|e| UpstreamError::parse(format!("Failed to parse response: {}", e)))?;
        Ok(UpstreamReply::classify(&value))
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    model: &'a str,
    request: &'a UpstreamRequest,
}

#[async_trait]
impl UpstreamModel for OnlySqProvider {
    async fn complete(&self, request: UpstreamRequest) -> Result<UpstreamReply, UpstreamError> {
        let envelope = Envelope {
            model: &self.config.model,
            request: &request,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let result = Self::interpret(status, &body);
        match &result {
            Ok(reply) => debug!(status = status.as_u16(), kind = reply.kind(), "Upstream replied"),
            Err(e) => warn!(status = status.as_u16(), error = %e, "Upstream call failed"),
        }
        result
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
