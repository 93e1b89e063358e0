//! Request/response bodies for the relay endpoint.

use serde::{Deserialize, Serialize};

/// Successful reply: `{ "text": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReplyResponse {
    pub text: String,
}

/// Failure reply: `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new("Internal server error")
    }
}
