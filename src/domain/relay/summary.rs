//! Attachment summary and metadata sent upstream.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::Attachment;

/// Header line that opens the summary appended to the target message.
pub const SUMMARY_HEADER: &str = "Attached files:";

/// Human-readable list of processed attachments, ready to append to a
/// message body. `None` when nothing was processed.
pub fn attachment_summary(attachments: &[Attachment]) -> Option<String> {
    if attachments.is_empty() {
        return None;
    }

    let lines: Vec<String> = attachments
        .iter()
        .map(|a| format!("- {} ({})", a.name(), a.mime_type()))
        .collect();

    Some(format!("\n\n{}\n{}", SUMMARY_HEADER, lines.join("\n")))
}

/// Name and type of one attachment, as listed in `meta.files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// The `meta` object of an upstream request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub image_count: usize,
    pub files: Vec<FileMeta>,
}

impl AttachmentMeta {
    /// Builds metadata for the processed attachments; `None` when empty so
    /// the field is omitted from the request.
    pub fn from_attachments(attachments: &[Attachment]) -> Option<Self> {
        if attachments.is_empty() {
            return None;
        }

        let files = attachments
            .iter()
            .map(|a| FileMeta {
                name: a.name().to_string(),
                mime_type: a.mime_type().to_string(),
            })
            .collect();

        Some(Self {
            image_count: attachments.len(),
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str, mime: &str) -> Attachment {
        Attachment::from_bytes(name, mime, b"x")
    }

    #[test]
    fn summary_lists_each_file() {
        let summary = attachment_summary(&[
            attachment("report.pdf", "application/pdf"),
            attachment("notes.txt", "text/plain"),
        ])
        .unwrap();

        assert_eq!(
            summary,
            "\n\nAttached files:\n- report.pdf (application/pdf)\n- notes.txt (text/plain)"
        );
    }

    #[test]
    fn summary_is_none_without_files() {
        assert!(attachment_summary(&[]).is_none());
        assert!(AttachmentMeta::from_attachments(&[]).is_none());
    }

    #[test]
    fn meta_serializes_type_field() {
        let meta = AttachmentMeta::from_attachments(&[attachment("report.pdf", "application/pdf")])
            .unwrap();
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "image_count": 1,
                "files": [{"name": "report.pdf", "type": "application/pdf"}]
            })
        );
    }
}
