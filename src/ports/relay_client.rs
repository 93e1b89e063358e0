//! Relay Client Port - How the chat controller reaches the relay endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::conversation::{StagedFile, WireMessage};

/// Port for submitting a conversation to the relay.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Performs one request. No retries.
    async fn send(&self, request: RelayRequest) -> Result<RelayReply, RelayClientError>;
}

/// Everything one submit sends to the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    /// Full history including the new user message.
    pub messages: Vec<WireMessage>,
    /// Files attached to the new user message.
    pub files: Vec<StagedFile>,
    /// Index in `messages` of the message the files belong to.
    pub target_index: Option<usize>,
}

/// Successful relay answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RelayReplyBody")]
pub enum RelayReply {
    /// `{text}` with non-empty text.
    Text(String),
    /// `{answer}` with non-empty answer.
    Answer(String),
    /// Neither field present.
    Empty,
}

#[derive(Deserialize)]
struct RelayReplyBody {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

impl From<RelayReplyBody> for RelayReply {
    fn from(body: RelayReplyBody) -> Self {
        match (body.text, body.answer) {
            (Some(text), _) if !text.is_empty() => Self::Text(text),
            (_, Some(answer)) if !answer.is_empty() => Self::Answer(answer),
            _ => Self::Empty,
        }
    }
}

/// Relay call errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayClientError {
    /// Relay answered with a non-success status.
    #[error("relay returned status {status}")]
    Status {
        status: u16,
        /// `error` field of the body, when present.
        message: Option<String>,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid relay response: {0}")]
    Decode(String),

    /// The request could not be assembled.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl RelayClientError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}
