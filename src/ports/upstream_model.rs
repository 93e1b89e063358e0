//! Upstream Model Port - Interface for the hosted language-model API.
//!
//! The relay handler builds an [`UpstreamRequest`] and hands it to an
//! implementation of [`UpstreamModel`], which performs exactly one call and
//! classifies whatever comes back.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoModel;
//!
//! #[async_trait]
//! impl UpstreamModel for EchoModel {
//!     async fn complete(&self, request: UpstreamRequest) -> Result<UpstreamReply, UpstreamError> {
//!         let last = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
//!         Ok(UpstreamReply::Text(last))
//!     }
//!
//!     fn model(&self) -> &str {
//!         "echo"
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::conversation::WireMessage;
use crate::domain::relay::{AttachmentMeta, UpstreamReply};

/// Port for the external language-model service.
#[async_trait]
pub trait UpstreamModel: Send + Sync {
    /// Sends one request. No retries.
    ///
    /// An error-flagged body decodes to `Ok(UpstreamReply::Error { .. })`;
    /// `Err` is reserved for transport failures, non-success statuses
    /// without an error body, and undecodable bodies.
    async fn complete(&self, request: UpstreamRequest) -> Result<UpstreamReply, UpstreamError>;

    /// Model identifier placed in every request.
    fn model(&self) -> &str;
}

/// The `request` object of the upstream body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamRequest {
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<AttachmentMeta>,
}

impl UpstreamRequest {
    pub fn new(messages: Vec<WireMessage>) -> Self {
        Self {
            messages,
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: Option<AttachmentMeta>) -> Self {
        self.meta = meta;
        self
    }
}

/// Upstream call errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status and no error body.
    #[error("upstream rejected request with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// Could not reach the upstream service.
    #[error("network error: {0}")]
    Network(String),

    /// Client-side timeout elapsed.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Body was not JSON.
    #[error("parse error: {0}")]
    Parse(String),
}

impl UpstreamError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Role;
    use crate::domain::relay::FileMeta;
    use serde_json::json;

    #[test]
    fn request_without_meta_omits_field() {
        let request = UpstreamRequest::new(vec![WireMessage::new(Role::User, "hi")]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, json!({"messages": [{"role": "user", "content": "hi"}]}));
    }

    #[test]
    fn request_with_meta_serializes_it() {
        let meta = AttachmentMeta {
            image_count: 1,
            files: vec![FileMeta {
                name: "a.png".into(),
                mime_type: "image/png".into(),
            }],
        };
        let request = UpstreamRequest::new(vec![]).with_meta(Some(meta));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["meta"]["files"][0]["type"], "image/png");
        assert_eq!(json["meta"]["image_count"], 1);
    }

    #[test]
    fn error_messages_display() {
        assert_eq!(
            UpstreamError::Rejected { status: 502 }.to_string(),
            "upstream rejected request with status 502"
        );
        assert_eq!(
            UpstreamError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
        assert_eq!(UpstreamError::network("refused").to_string(), "network error: refused");
    }
}
