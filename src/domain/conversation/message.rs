//! Message entity for conversations.
//!
//! User and system messages are immutable once appended. Assistant messages
//! start life as a pending placeholder keyed by a [`CorrelationId`] and are
//! settled exactly once, either with the reply text or with an error string.

use serde::{Deserialize, Serialize};

use super::attachment::Attachment;
use super::errors::ConversationError;
use crate::domain::foundation::{CorrelationId, Timestamp};

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User input.
    User,
    /// AI assistant response.
    Assistant,
    /// System instructions.
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

/// The `{role, content}` pair exchanged between client, relay and upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl WireMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A message typed by the user, with whatever files were staged alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    content: String,
    attachments: Vec<Attachment>,
    created_at: Timestamp,
}

impl UserMessage {
    pub fn new(content: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            content: content.into(),
            attachments,
            created_at: Timestamp::now(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemMessage {
    content: String,
    created_at: Timestamp,
}

impl SystemMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// How a pending assistant message ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The relay produced reply text.
    Resolved(String),
    /// The call failed; holds the user-facing error string.
    Failed(String),
}

/// Lifecycle of an assistant message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantState {
    /// Placeholder awaiting the response for this submit.
    Pending(CorrelationId),
    Resolved(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantMessage {
    state: AssistantState,
    created_at: Timestamp,
}

impl AssistantMessage {
    /// Creates an empty placeholder for the given submit.
    pub fn placeholder(correlation_id: CorrelationId) -> Self {
        Self {
            state: AssistantState::Pending(correlation_id),
            created_at: Timestamp::now(),
        }
    }

    pub fn state(&self) -> &AssistantState {
        &self.state
    }

    pub fn correlation_id(&self) -> Option<CorrelationId> {
        match self.state {
            AssistantState::Pending(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, AssistantState::Pending(_))
    }

    /// Content shown to the user; empty while pending.
    pub fn content(&self) -> &str {
        match &self.state {
            AssistantState::Pending(_) => "",
            AssistantState::Resolved(text) | AssistantState::Failed(text) => text,
        }
    }

    /// Moves a pending placeholder into its final state.
    ///
    /// # Errors
    ///
    /// - `AlreadySettled` if the message is no longer pending
    pub fn settle(&mut self, settlement: Settlement) -> Result<(), ConversationError> {
        if !self.is_pending() {
            return Err(ConversationError::AlreadySettled);
        }
        self.state = match settlement {
            Settlement::Resolved(text) => AssistantState::Resolved(text),
            Settlement::Failed(text) => AssistantState::Failed(text),
        };
        Ok(())
    }
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    User(UserMessage),
    System(SystemMessage),
    Assistant(AssistantMessage),
}

impl Message {
    pub fn role(&self) -> Role {
        match self {
            Self::User(_) => Role::User,
            Self::System(_) => Role::System,
            Self::Assistant(_) => Role::Assistant,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::User(m) => m.content(),
            Self::System(m) => m.content(),
            Self::Assistant(m) => m.content(),
        }
    }

    pub fn attachments(&self) -> &[Attachment] {
        match self {
            Self::User(m) => m.attachments(),
            Self::System(_) | Self::Assistant(_) => &[],
        }
    }

    pub fn created_at(&self) -> Timestamp {
        match self {
            Self::User(m) => m.created_at,
            Self::System(m) => m.created_at,
            Self::Assistant(m) => m.created_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Assistant(m) if m.is_pending())
    }

    /// Wire form of a settled message. Pending placeholders have none.
    pub fn to_wire(&self) -> Option<WireMessage> {
        if self.is_pending() {
            return None;
        }
        Some(WireMessage::new(self.role(), self.content()))
    }
}
