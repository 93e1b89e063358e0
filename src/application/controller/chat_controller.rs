//! Chat controller - client-side conversation state and submit lifecycle.
//!
//! A submit moves through `Idle -> AwaitingResponse -> {Resolved | Errored}`.
//! It runs in three steps so the caller never has to hold the controller
//! across the network call:
//!
//! 1. [`ChatController::begin_submit`] appends the user message and the
//!    assistant placeholder and returns a [`PendingSubmission`]
//! 2. [`PendingSubmission::dispatch`] performs the single relay call
//! 3. [`ChatController::apply`] settles the placeholder by correlation id
//!
//! [`ChatController::submit`] chains the three for callers that do not need
//! to interleave other actions.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::conversation::{Attachment, Conversation, Message, Settlement, StagedFile};
use crate::domain::foundation::CorrelationId;
use crate::domain::locale::{Language, Locale};
use crate::ports::{RelayClient, RelayClientError, RelayReply, RelayRequest};

/// Where the controller stands in the submit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    /// Nothing submitted yet, or the conversation was cleared.
    #[default]
    Idle,
    /// A request is in flight; submitting is disabled.
    AwaitingResponse(CorrelationId),
    /// The last submit produced reply text.
    Resolved,
    /// The last submit failed.
    Errored,
}

impl SubmitState {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingResponse(_))
    }
}

/// A submit that has updated local state and still needs its relay call.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    correlation_id: CorrelationId,
    request: RelayRequest,
}

impl PendingSubmission {
    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    pub fn request(&self) -> &RelayRequest {
        &self.request
    }

    /// Performs the relay call. Exactly one call, no retry.
    pub async fn dispatch(self, client: &dyn RelayClient) -> SubmissionOutcome {
        let result = client.send(self.request).await;
        SubmissionOutcome {
            correlation_id: self.correlation_id,
            result,
        }
    }
}

/// What came back for a submission.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub correlation_id: CorrelationId,
    pub result: Result<RelayReply, RelayClientError>,
}

/// Owns the conversation, the draft input and the staged files.
pub struct ChatController {
    client: Arc<dyn RelayClient>,
    locale: Locale,
    conversation: Conversation,
    draft: String,
    staged: Vec<StagedFile>,
    state: SubmitState,
}

impl ChatController {
    pub fn new(client: Arc<dyn RelayClient>, locale: Locale) -> Self {
        Self {
            client,
            locale,
            conversation: Conversation::new(),
            draft: String::new(),
            staged: Vec::new(),
            state: SubmitState::Idle,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn set_language(&mut self, language: Language) {
        self.locale.set_language(language);
    }

    pub fn toggle_language(&mut self) {
        self.locale.toggle();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn staged_files(&self) -> &[StagedFile] {
        &self.staged
    }

    pub fn add_file(&mut self, file: StagedFile) {
        self.staged.push(file);
    }

    /// Removes a staged file. Out-of-range indices are ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<StagedFile> {
        if index < self.staged.len() {
            Some(self.staged.remove(index))
        } else {
            None
        }
    }

    /// Whether a submit would do anything right now.
    pub fn can_submit(&self) -> bool {
        !self.state.is_awaiting() && (!self.draft.trim().is_empty() || !self.staged.is_empty())
    }

    /// Appends the user message and placeholder and moves to
    /// `AwaitingResponse`.
    ///
    /// Returns `None`, leaving every piece of state untouched, when a request
    /// is already in flight or there is neither text nor files.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if self.state.is_awaiting() {
            debug!("Submit ignored while awaiting response");
            return None;
        }
        if self.draft.trim().is_empty() && self.staged.is_empty() {
            return None;
        }

        let content = std::mem::take(&mut self.draft);
        let files = std::mem::take(&mut self.staged);
        let attachments = files.iter().map(Attachment::from_staged).collect();

        self.conversation.push_user(content, attachments);
        let messages = self.conversation.history();
        let target_index = messages.len().checked_sub(1);

        let correlation_id = CorrelationId::new();
        self.conversation.open_placeholder(correlation_id);
        self.state = SubmitState::AwaitingResponse(correlation_id);

        debug!(
            %correlation_id,
            messages = messages.len(),
            files = files.len(),
            "Submitting conversation"
        );

        Some(PendingSubmission {
            correlation_id,
            request: RelayRequest {
                messages,
                files,
                target_index,
            },
        })
    }

    /// Settles the placeholder for `outcome`.
    ///
    /// Returns `false` when the placeholder no longer exists, which happens
    /// if the conversation was cleared while the call was in flight; the
    /// response is dropped.
    pub fn apply(&mut self, outcome: SubmissionOutcome) -> bool {
        let translations = self.locale.translations();
        let (settlement, next_state) = match outcome.result {
            Ok(RelayReply::Text(text)) | Ok(RelayReply::Answer(text)) => {
                (Settlement::Resolved(text), SubmitState::Resolved)
            }
            Ok(RelayReply::Empty) => (
                Settlement::Resolved(translations.no_response.to_string()),
                SubmitState::Resolved,
            ),
            Err(e) => {
                warn!(correlation_id = %outcome.correlation_id, error = %e, "Relay call failed");
                (
                    Settlement::Failed(translations.error_message.to_string()),
                    SubmitState::Errored,
                )
            }
        };

        if self.state == SubmitState::AwaitingResponse(outcome.correlation_id) {
            self.state = next_state;
        }

        match self.conversation.settle(outcome.correlation_id, settlement) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Dropping stale response");
                false
            }
        }
    }

    /// Full submit: begin, call the relay, settle.
    ///
    /// Returns `false` when the submit was a no-op.
    pub async fn submit(&mut self) -> bool {
        let Some(pending) = self.begin_submit() else {
            return false;
        };
        let client = Arc::clone(&self.client);
        let outcome = pending.dispatch(client.as_ref()).await;
        self.apply(outcome);
        true
    }

    /// Replaces the draft with `text` and submits it with the staged files.
    pub async fn submit_text(&mut self, text: impl Into<String>) -> bool {
        self.set_draft(text);
        self.submit().await
    }

    /// Empties the conversation, the staged files and the draft. A response
    /// still in flight will find no placeholder and be dropped.
    pub fn clear(&mut self) {
        self.conversation.clear();
        self.staged.clear();
        self.draft.clear();
        self.state = SubmitState::Idle;
    }

    /// Starts a fresh conversation.
    pub fn new_chat(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::relay_client::MockRelayClient;
    use crate::domain::conversation::{AssistantState, Role, WireMessage};
    use crate::domain::locale::RUSSIAN;
    use proptest::prelude::*;

    fn controller(client: &MockRelayClient) -> ChatController {
        ChatController::new(Arc::new(client.clone()), Locale::default())
    }

    fn error_text() -> &'static str {
        Locale::default().translations().error_message
    }

    mod submit_validation {
        use super::*;

        #[tokio::test]
        async fn empty_submit_changes_nothing() {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.set_draft("   \n\t");

            assert!(!chat.can_submit());
            assert!(!chat.submit().await);

            assert!(chat.messages().is_empty());
            assert_eq!(chat.draft(), "   \n\t");
            assert_eq!(chat.state(), SubmitState::Idle);
            assert_eq!(client.call_count(), 0);
        }

        #[test]
        fn files_alone_are_enough_to_submit() {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.add_file(StagedFile::new("a.txt", "text/plain", b"a".to_vec()));

            let pending = chat.begin_submit().unwrap();

            assert_eq!(chat.messages().len(), 2);
            assert_eq!(chat.messages()[0].content(), "");
            assert_eq!(chat.messages()[0].attachments().len(), 1);
            assert_eq!(pending.request().files.len(), 1);
        }

        #[test]
        fn submit_is_disabled_while_awaiting() {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.set_draft("first");
            let _pending = chat.begin_submit().unwrap();

            chat.set_draft("second");
            assert!(!chat.can_submit());
            assert!(chat.begin_submit().is_none());
            assert_eq!(chat.messages().len(), 2);
            assert_eq!(chat.draft(), "second");
        }
    }

    mod submit_lifecycle {
        use super::*;

        #[test]
        fn begin_appends_user_then_placeholder_and_clears_staging() {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.set_draft("hello");
            chat.add_file(StagedFile::new("a.bin", "application/octet-stream", vec![0xff]));

            let pending = chat.begin_submit().unwrap();

            let messages = chat.messages();
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[0].role(), Role::User);
            assert_eq!(messages[0].content(), "hello");
            assert!(messages[1].is_pending());
            assert_eq!(chat.draft(), "");
            assert!(chat.staged_files().is_empty());
            assert_eq!(
                chat.state(),
                SubmitState::AwaitingResponse(pending.correlation_id())
            );
        }

        #[test]
        fn request_carries_history_and_target() {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.set_draft("one");
            let first = chat.begin_submit().unwrap();
            chat.apply(SubmissionOutcome {
                correlation_id: first.correlation_id(),
                result: Ok(RelayReply::Text("reply one".into())),
            });

            chat.set_draft("two");
            let second = chat.begin_submit().unwrap();

            assert_eq!(
                second.request().messages,
                vec![
                    WireMessage::new(Role::User, "one"),
                    WireMessage::new(Role::Assistant, "reply one"),
                    WireMessage::new(Role::User, "two"),
                ]
            );
            assert_eq!(second.request().target_index, Some(2));
        }

        #[tokio::test]
        async fn successful_reply_fills_placeholder() {
            let client = MockRelayClient::new().with_reply(RelayReply::Text("hi".into()));
            let mut chat = controller(&client);

            assert!(chat.submit_text("hello").await);

            assert_eq!(chat.messages().len(), 2);
            assert_eq!(chat.messages()[1].content(), "hi");
            assert_eq!(chat.state(), SubmitState::Resolved);
            assert_eq!(client.call_count(), 1);
            let sent = client.requests();
            assert_eq!(sent[0].messages, vec![WireMessage::new(Role::User, "hello")]);
            assert_eq!(sent[0].target_index, Some(0));
        }

        #[tokio::test]
        async fn answer_reply_fills_placeholder() {
            let client = MockRelayClient::new().with_reply(RelayReply::Answer("42".into()));
            let mut chat = controller(&client);

            chat.submit_text("question").await;

            assert_eq!(chat.messages()[1].content(), "42");
        }

        #[tokio::test]
        async fn empty_reply_uses_no_response_text() {
            let client = MockRelayClient::new().with_reply(RelayReply::Empty);
            let mut chat = controller(&client);

            chat.submit_text("hello").await;

            assert_eq!(chat.messages()[1].content(), "No response received");
            assert_eq!(chat.state(), SubmitState::Resolved);
        }

        #[tokio::test]
        async fn failure_writes_localized_error() {
            let client = MockRelayClient::new().with_error(RelayClientError::Status {
                status: 400,
                message: Some("boom".into()),
            });
            let mut chat = controller(&client);

            chat.submit_text("hello").await;

            match chat.messages()[1] {
                Message::Assistant(ref assistant) => {
                    assert_eq!(
                        assistant.state(),
                        &AssistantState::Failed(error_text().to_string())
                    );
                }
                ref other => panic!("expected assistant message, got {:?}", other),
            }
            assert_eq!(chat.state(), SubmitState::Errored);
        }

        #[tokio::test]
        async fn error_text_follows_active_language() {
            let client = MockRelayClient::new().with_error(RelayClientError::network("down"));
            let mut chat = controller(&client);
            chat.set_language(Language::Ru);

            chat.submit_text("привет").await;

            assert_eq!(chat.messages()[1].content(), RUSSIAN.error_message);
        }

        #[tokio::test]
        async fn every_failure_looks_the_same() {
            let client = MockRelayClient::new()
                .with_error(RelayClientError::network("refused"))
                .with_error(RelayClientError::Decode("not json".into()))
                .with_error(RelayClientError::Status {
                    status: 500,
                    message: None,
                });
            let mut chat = controller(&client);

            for text in ["a", "b", "c"] {
                chat.submit_text(text).await;
            }

            let errors: Vec<&str> = chat
                .messages()
                .iter()
                .filter(|m| m.role() == Role::Assistant)
                .map(Message::content)
                .collect();
            assert_eq!(errors, vec![error_text(); 3]);
            assert_eq!(client.call_count(), 3);
        }
    }

    mod clearing {
        use super::*;

        #[tokio::test]
        async fn clear_then_submit_starts_fresh() {
            let client = MockRelayClient::new()
                .with_reply(RelayReply::Text("first".into()))
                .with_reply(RelayReply::Text("second".into()));
            let mut chat = controller(&client);
            chat.submit_text("before").await;
            chat.add_file(StagedFile::new("x.txt", "text/plain", b"x".to_vec()));

            chat.clear();
            assert!(chat.messages().is_empty());
            assert!(chat.staged_files().is_empty());

            chat.set_draft("hello");
            let pending = chat.begin_submit().unwrap();

            assert_eq!(chat.messages().len(), 2);
            assert_eq!(chat.messages()[0].content(), "hello");
            assert!(chat.messages()[1].is_pending());
            assert!(pending.request().files.is_empty());
        }

        #[test]
        fn stale_response_after_clear_is_dropped() {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.set_draft("old");
            let stale = chat.begin_submit().unwrap();

            chat.clear();
            chat.set_draft("new");
            let fresh = chat.begin_submit().unwrap();

            let applied = chat.apply(SubmissionOutcome {
                correlation_id: stale.correlation_id(),
                result: Ok(RelayReply::Text("late".into())),
            });

            assert!(!applied);
            assert!(chat.messages()[1].is_pending());
            assert_eq!(
                chat.state(),
                SubmitState::AwaitingResponse(fresh.correlation_id())
            );

            assert!(chat.apply(SubmissionOutcome {
                correlation_id: fresh.correlation_id(),
                result: Ok(RelayReply::Text("current".into())),
            }));
            assert_eq!(chat.messages()[1].content(), "current");
        }

        #[test]
        fn new_chat_resets_draft_and_state() {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.set_draft("pending");
            let _ = chat.begin_submit();
            chat.set_draft("typed");

            chat.new_chat();

            assert_eq!(chat.draft(), "");
            assert_eq!(chat.state(), SubmitState::Idle);
            assert!(chat.conversation().is_empty());
        }
    }

    mod staging {
        use super::*;

        #[test]
        fn remove_file_by_index() {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.add_file(StagedFile::new("a", "text/plain", vec![]));
            chat.add_file(StagedFile::new("b", "text/plain", vec![]));

            let removed = chat.remove_file(0).unwrap();

            assert_eq!(removed.name(), "a");
            assert_eq!(chat.staged_files().len(), 1);
            assert_eq!(chat.staged_files()[0].name(), "b");
        }

        #[test]
        fn remove_file_out_of_range_is_noop() {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.add_file(StagedFile::new("a", "text/plain", vec![]));

            assert!(chat.remove_file(5).is_none());
            assert_eq!(chat.staged_files().len(), 1);
        }
    }

    proptest! {
        #[test]
        fn non_blank_text_appends_exactly_two_messages(text in ".*[^\\s].*") {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.set_draft(text.clone());

            prop_assert!(chat.begin_submit().is_some());

            let messages = chat.messages();
            prop_assert_eq!(messages.len(), 2);
            prop_assert_eq!(messages[0].role(), Role::User);
            prop_assert_eq!(messages[0].content(), text.as_str());
            prop_assert!(messages[1].is_pending());
        }

        #[test]
        fn blank_text_without_files_is_rejected(text in "[ \\t\\n\\r]*") {
            let client = MockRelayClient::new();
            let mut chat = controller(&client);
            chat.set_draft(text);

            prop_assert!(chat.begin_submit().is_none());
            prop_assert!(chat.messages().is_empty());
            prop_assert_eq!(chat.state(), SubmitState::Idle);
        }
    }
}
