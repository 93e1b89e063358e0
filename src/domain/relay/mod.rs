//! Relay domain module.
//!
//! Vocabulary shared by the relay handler and the upstream adapters: the
//! attachment summary and metadata added to outbound requests, and the
//! classification of upstream replies.

mod reply;
mod summary;

pub use reply::{UpstreamReply, DEFAULT_UPSTREAM_ERROR, UNEXTRACTABLE_REPLY};
pub use summary::{attachment_summary, AttachmentMeta, FileMeta, SUMMARY_HEADER};
