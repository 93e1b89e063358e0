//! Conversation aggregate entity.
//!
//! The conversation is an ordered sequence of messages owned by a single
//! client controller. It lives only as long as the session.
//!
//! # Invariants
//!
//! - Messages keep insertion order
//! - Only a pending assistant placeholder can change, and only once
//! - A placeholder is found by its correlation id, never by position

use super::attachment::Attachment;
use super::errors::ConversationError;
use super::message::{AssistantMessage, Message, Settlement, SystemMessage, UserMessage, WireMessage};
use crate::domain::foundation::CorrelationId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends a user message and returns its index.
    pub fn push_user(&mut self, content: impl Into<String>, attachments: Vec<Attachment>) -> usize {
        self.messages
            .push(Message::User(UserMessage::new(content, attachments)));
        self.messages.len() - 1
    }

    /// Appends a system message and returns its index.
    pub fn push_system(&mut self, content: impl Into<String>) -> usize {
        self.messages.push(Message::System(SystemMessage::new(content)));
        self.messages.len() - 1
    }

    /// Appends an empty assistant placeholder for a submit.
    pub fn open_placeholder(&mut self, correlation_id: CorrelationId) -> usize {
        self.messages
            .push(Message::Assistant(AssistantMessage::placeholder(correlation_id)));
        self.messages.len() - 1
    }

    /// Settles the placeholder opened for `correlation_id`.
    ///
    /// # Errors
    ///
    /// - `PlaceholderNotFound` if no pending placeholder has that id, for
    ///   example because the conversation was cleared while the call was in
    ///   flight
    pub fn settle(
        &mut self,
        correlation_id: CorrelationId,
        settlement: Settlement,
    ) -> Result<(), ConversationError> {
        let placeholder = self
            .messages
            .iter_mut()
            .find_map(|message| match message {
                Message::Assistant(assistant)
                    if assistant.correlation_id() == Some(correlation_id) =>
                {
                    Some(assistant)
                }
                _ => None,
            })
            .ok_or(ConversationError::PlaceholderNotFound(correlation_id))?;

        placeholder.settle(settlement)
    }

    /// Correlation id of the placeholder still waiting for a reply, if any.
    pub fn pending(&self) -> Option<CorrelationId> {
        self.messages.iter().find_map(|message| match message {
            Message::Assistant(assistant) => assistant.correlation_id(),
            _ => None,
        })
    }

    /// Wire history of every settled message, in order.
    pub fn history(&self) -> Vec<WireMessage> {
        self.messages.iter().filter_map(Message::to_wire).collect()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Role;

    #[test]
    fn push_returns_indices_in_order() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.push_system("be brief"), 0);
        assert_eq!(conversation.push_user("hi", vec![]), 1);
        assert_eq!(conversation.open_placeholder(CorrelationId::new()), 2);
        assert_eq!(conversation.len(), 3);
    }

    #[test]
    fn settle_targets_placeholder_by_id() {
        let mut conversation = Conversation::new();
        let first = CorrelationId::new();
        conversation.push_user("one", vec![]);
        conversation.open_placeholder(first);

        conversation
            .settle(first, Settlement::Resolved("answer".into()))
            .unwrap();

        assert_eq!(conversation.messages()[1].content(), "answer");
        assert!(conversation.pending().is_none());
    }

    #[test]
    fn settle_unknown_id_is_not_found() {
        let mut conversation = Conversation::new();
        conversation.open_placeholder(CorrelationId::new());
        let stranger = CorrelationId::new();

        let result = conversation.settle(stranger, Settlement::Resolved("x".into()));

        assert_eq!(result, Err(ConversationError::PlaceholderNotFound(stranger)));
        assert!(conversation.messages()[0].is_pending());
    }

    #[test]
    fn settle_twice_is_not_found_the_second_time() {
        let mut conversation = Conversation::new();
        let id = CorrelationId::new();
        conversation.open_placeholder(id);
        conversation.settle(id, Settlement::Failed("err".into())).unwrap();

        let again = conversation.settle(id, Settlement::Resolved("late".into()));
        assert_eq!(again, Err(ConversationError::PlaceholderNotFound(id)));
        assert_eq!(conversation.messages()[0].content(), "err");
    }

    #[test]
    fn history_skips_pending_placeholders() {
        let mut conversation = Conversation::new();
        conversation.push_user("hello", vec![]);
        let id = CorrelationId::new();
        conversation.open_placeholder(id);

        assert_eq!(conversation.history(), vec![WireMessage::new(Role::User, "hello")]);

        conversation.settle(id, Settlement::Resolved("hey".into())).unwrap();
        assert_eq!(conversation.history().len(), 2);
        assert_eq!(conversation.history()[1].role, Role::Assistant);
    }

    #[test]
    fn settling_keeps_creation_times() {
        let mut conversation = Conversation::new();
        conversation.push_user("hello", vec![]);
        let id = CorrelationId::new();
        conversation.open_placeholder(id);
        let opened_at = conversation.messages()[1].created_at();

        conversation.settle(id, Settlement::Resolved("hey".into())).unwrap();

        let messages = conversation.messages();
        assert_eq!(messages[1].created_at(), opened_at);
        assert!(messages[0].created_at() <= messages[1].created_at());
    }

    #[test]
    fn clear_empties_everything() {
        let mut conversation = Conversation::new();
        conversation.push_user("hello", vec![]);
        conversation.open_placeholder(CorrelationId::new());
        conversation.clear();
        assert!(conversation.is_empty());
        assert!(conversation.pending().is_none());
    }
}
