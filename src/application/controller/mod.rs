//! Client-side conversation controller.

mod chat_controller;

pub use chat_controller::{ChatController, PendingSubmission, SubmissionOutcome, SubmitState};
