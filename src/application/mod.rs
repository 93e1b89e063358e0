//! Application layer - Handlers and the client controller.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The relay handler serves the HTTP endpoint; the chat controller drives a
//! conversation from the client side.

pub mod controller;
pub mod handlers;

pub use controller::{ChatController, PendingSubmission, SubmissionOutcome, SubmitState};
pub use handlers::{RelayCommand, RelayError, RelayMessageHandler, RelayResult};
