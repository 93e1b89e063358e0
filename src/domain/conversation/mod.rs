//! Conversation domain module.
//!
//! Client-side chat state: messages, attachments, and the conversation
//! aggregate that owns them for the length of a session.

mod aggregate;
mod attachment;
mod errors;
mod message;

pub use aggregate::Conversation;
pub use attachment::{
    is_textual_mime, Attachment, AttachmentError, AttachmentPayload, StagedFile,
    DEFAULT_MIME_TYPE,
};
pub use errors::ConversationError;
pub use message::{
    AssistantMessage, AssistantState, Message, Role, Settlement, SystemMessage, UserMessage,
    WireMessage,
};
