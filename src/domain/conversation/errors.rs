//! Errors raised by the conversation aggregate.

use thiserror::Error;

use crate::domain::foundation::CorrelationId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    /// No pending placeholder carries this correlation id.
    #[error("no pending placeholder for correlation id {0}")]
    PlaceholderNotFound(CorrelationId),

    /// The assistant message was already resolved or failed.
    #[error("assistant message already settled")]
    AlreadySettled,
}
