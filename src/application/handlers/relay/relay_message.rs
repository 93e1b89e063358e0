//! RelayMessage command handler.
//!
//! Turns one client submission into one upstream call:
//!
//! 1. Decode each attachment; a file that fails is logged and skipped
//! 2. Append the attachment summary to the target message
//! 3. Build the upstream request with attachment metadata
//! 4. Call the upstream model once
//! 5. Reduce the classified reply to text, or to a rejection

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::conversation::{Attachment, AttachmentError, Role, StagedFile, WireMessage};
use crate::domain::relay::{attachment_summary, AttachmentMeta, UpstreamReply, UNEXTRACTABLE_REPLY};
use crate::ports::{UpstreamError, UpstreamModel, UpstreamRequest};

/// Command carrying one decoded client submission.
#[derive(Debug, Clone)]
pub struct RelayCommand {
    /// Conversation history, newest last.
    pub messages: Vec<WireMessage>,
    /// File parts in arrival order; `Err` when the part could not be read.
    pub files: Vec<Result<StagedFile, AttachmentError>>,
    /// Message that receives the attachment summary. When absent the last
    /// user message is used.
    pub target_index: Option<usize>,
}

impl RelayCommand {
    pub fn new(messages: Vec<WireMessage>) -> Self {
        Self {
            messages,
            files: Vec::new(),
            target_index: None,
        }
    }

    pub fn with_file(mut self, file: StagedFile) -> Self {
        self.files.push(Ok(file));
        self
    }

    pub fn with_target(mut self, index: usize) -> Self {
        self.target_index = Some(index);
        self
    }

    /// Builds a command from raw form fields.
    ///
    /// # Errors
    ///
    /// - `MalformedPayload` if `messages` is missing or not a JSON array of
    ///   `{role, content}`, or if `target_index` is not an integer
    pub fn from_parts(
        messages_json: Option<&str>,
        files: Vec<Result<StagedFile, AttachmentError>>,
        target_index: Option<&str>,
    ) -> Result<Self, RelayError> {
        let messages_json =
            messages_json.ok_or_else(|| RelayError::malformed("missing 'messages' field"))?;
        let messages: Vec<WireMessage> = serde_json::from_str(messages_json)
            .map_err(|e| RelayError::malformed(format!("invalid 'messages' JSON: {}", e)))?;

        let target_index = target_index
            .map(|raw| {
                raw.trim()
                    .parse::<usize>()
                    .map_err(|_| RelayError::malformed(format!("invalid 'target_index': {}", raw)))
            })
            .transpose()?;

        Ok(Self {
            messages,
            files,
            target_index,
        })
    }
}

/// Errors that can occur while relaying a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Client payload could not be understood.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// `target_index` points past the end of the history.
    #[error("target message {index} out of range for {len} messages")]
    InvalidTarget { index: usize, len: usize },

    /// Upstream flagged its reply as an error.
    #[error("upstream error: {0}")]
    UpstreamRejected(String),

    /// Upstream call failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload(message.into())
    }
}

/// Result of relaying a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResult {
    /// Reply text for the client.
    pub text: String,
    /// Attachments forwarded upstream.
    pub attached: usize,
    /// Attachments dropped after a decode or read failure.
    pub skipped: usize,
}

/// Handler for relaying submissions upstream. Holds no per-request state.
pub struct RelayMessageHandler {
    upstream: Arc<dyn UpstreamModel>,
}

impl RelayMessageHandler {
    pub fn new(upstream: Arc<dyn UpstreamModel>) -> Self {
        Self { upstream }
    }

    pub async fn handle(&self, cmd: RelayCommand) -> Result<RelayResult, RelayError> {
        let RelayCommand {
            mut messages,
            files,
            target_index,
        } = cmd;

        // 1. Resolve which message the files belong to
        let target = resolve_target(&messages, target_index)?;

        // 2. Decode attachments, skipping failures
        let received = files.len();
        let attachments = decode_attachments(files);
        let skipped = received - attachments.len();

        // 3. Annotate the target message
        if let Some(summary) = attachment_summary(&attachments) {
            match target {
                Some(index) => messages[index].content.push_str(&summary),
                None => warn!(
                    attachments = attachments.len(),
                    "No user message to annotate with attachment summary"
                ),
            }
        }

        // 4. One upstream call
        let request = UpstreamRequest::new(messages)
            .with_meta(AttachmentMeta::from_attachments(&attachments));

        info!(
            model = self.upstream.model(),
            messages = request.messages.len(),
            attached = attachments.len(),
            skipped,
            "Relaying conversation upstream"
        );

        let reply = self.upstream.complete(request).await?;
        debug!(kind = reply.kind(), "Upstream replied");

        // 5. Reduce the reply
        let text = match reply {
            UpstreamReply::Error { message } => return Err(RelayError::UpstreamRejected(message)),
            UpstreamReply::ChatCompletion { content } => content,
            UpstreamReply::Text(text) => text,
            UpstreamReply::Answer(answer) => answer,
            UpstreamReply::Unrecognized => UNEXTRACTABLE_REPLY.to_string(),
        };

        Ok(RelayResult {
            text,
            attached: attachments.len(),
            skipped,
        })
    }
}

fn resolve_target(
    messages: &[WireMessage],
    explicit: Option<usize>,
) -> Result<Option<usize>, RelayError> {
    match explicit {
        Some(index) if index < messages.len() => Ok(Some(index)),
        Some(index) => Err(RelayError::InvalidTarget {
            index,
            len: messages.len(),
        }),
        None => Ok(messages.iter().rposition(|m| m.role == Role::User)),
    }
}

fn decode_attachments(files: Vec<Result<StagedFile, AttachmentError>>) -> Vec<Attachment> {
    files
        .into_iter()
        .filter_map(|file| {
            let decoded = file.and_then(|staged| {
                Attachment::decode(staged.name(), staged.mime_type(), staged.bytes())
            });
            match decoded {
                Ok(attachment) => Some(attachment),
                Err(e) => {
                    warn!(file = e.file_name(), error = %e, "Error processing attachment, skipping");
                    None
                }
            }
        })
        .collect()
}
