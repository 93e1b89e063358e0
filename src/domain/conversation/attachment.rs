//! File attachments.
//!
//! A [`StagedFile`] is what the user picked before pressing send. At submit
//! time it becomes an [`Attachment`] owned by the user message, with its bytes
//! represented either as UTF-8 text or as base64.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME type assumed when a file part carries none.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A user-selected file waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Attachment content, either readable text or base64 of the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "data", rename_all = "snake_case")]
pub enum AttachmentPayload {
    Text(String),
    Base64(String),
}

impl AttachmentPayload {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

/// Errors raised while turning raw bytes into an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("attachment '{name}' declares {mime_type} but is not valid UTF-8")]
    InvalidText { name: String, mime_type: String },

    #[error("attachment '{name}' could not be read: {reason}")]
    Unreadable { name: String, reason: String },
}

impl AttachmentError {
    pub fn unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Name of the file that failed.
    pub fn file_name(&self) -> &str {
        match self {
            Self::InvalidText { name, .. } | Self::Unreadable { name, .. } => name,
        }
    }
}

/// An attachment owned by exactly one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    name: String,
    mime_type: String,
    payload: AttachmentPayload,
}

impl Attachment {
    /// Captures bytes without judging them: valid UTF-8 becomes text,
    /// everything else base64.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        let payload = match std::str::from_utf8(bytes) {
            Ok(text) => AttachmentPayload::Text(text.to_string()),
            Err(_) => AttachmentPayload::Base64(BASE64.encode(bytes)),
        };
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            payload,
        }
    }

    /// Decodes bytes received by the relay.
    ///
    /// Tries UTF-8 first and falls back to base64, except when the declared
    /// MIME type is textual: then bytes that are not UTF-8 contradict the
    /// declaration and the file is rejected.
    pub fn decode(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: &[u8],
    ) -> Result<Self, AttachmentError> {
        let name = name.into();
        let mime_type = mime_type.into();

        if std::str::from_utf8(bytes).is_err() && is_textual_mime(&mime_type) {
            return Err(AttachmentError::InvalidText { name, mime_type });
        }

        Ok(Self::from_bytes(name, mime_type, bytes))
    }

    pub fn from_staged(file: &StagedFile) -> Self {
        Self::from_bytes(file.name(), file.mime_type(), file.bytes())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn payload(&self) -> &AttachmentPayload {
        &self.payload
    }
}

/// Whether a MIME type promises character data.
pub fn is_textual_mime(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence.starts_with("text/") || essence.ends_with("+json") || essence.ends_with("+xml") {
        return true;
    }

    matches!(
        essence.as_str(),
        "application/json"
            | "application/xml"
            | "application/javascript"
            | "application/x-javascript"
            | "application/yaml"
            | "application/x-yaml"
            | "application/csv"
            | "application/x-sh"
    )
}
