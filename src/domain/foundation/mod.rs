//! Foundation module - Shared domain primitives.
//!
//! Identifiers and time values used across the conversation and relay
//! vocabularies.

mod ids;
mod timestamp;

pub use ids::CorrelationId;
pub use timestamp::Timestamp;
