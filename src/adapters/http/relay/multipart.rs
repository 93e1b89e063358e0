//! Reads the relay form into a [`RelayCommand`].
//!
//! Recognized fields are `messages`, `target_index` and any number of
//! `files`. Other fields are ignored.

use axum::extract::Multipart;
use tracing::{debug, warn};

use crate::application::handlers::RelayCommand;
use crate::application::handlers::RelayError;
use crate::domain::conversation::{AttachmentError, StagedFile, DEFAULT_MIME_TYPE};

/// File name used when a part carries none.
pub const UNNAMED_FILE: &str = "unnamed";

pub async fn read_relay_command(mut multipart: Multipart) -> Result<RelayCommand, RelayError> {
    let mut messages: Option<String> = None;
    let mut target_index: Option<String> = None;
    let mut files: Vec<Result<StagedFile, AttachmentError>> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(RelayError::malformed(format!("invalid multipart body: {}", e))),
        };

        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "messages" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| RelayError::malformed(format!("unreadable 'messages': {}", e)))?;
                messages = Some(text);
            }
            "target_index" => {
                let text = field.text().await.map_err(|e| {
                    RelayError::malformed(format!("unreadable 'target_index': {}", e))
                })?;
                target_index = Some(text);
            }
            "files" => {
                let name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(UNNAMED_FILE)
                    .to_string();
                let mime_type = field
                    .content_type()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(DEFAULT_MIME_TYPE)
                    .to_string();

                match field.bytes().await {
                    Ok(bytes) => files.push(Ok(StagedFile::new(name, mime_type, bytes.to_vec()))),
                    Err(e) => {
                        warn!(file = %name, error = %e, "File part unreadable, ignoring the rest of the form");
                        files.push(Err(AttachmentError::unreadable(name, e.to_string())));
                        break;
                    }
                }
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    RelayCommand::from_parts(messages.as_deref(), files, target_index.as_deref())
}
