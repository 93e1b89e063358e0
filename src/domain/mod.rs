//! Domain layer - Core types and logic.
//!
//! - `foundation` - Identifiers and timestamps
//! - `conversation` - Messages, attachments, the conversation aggregate
//! - `relay` - Upstream request metadata and reply classification
//! - `locale` - Language selection and translation catalogs

pub mod conversation;
pub mod foundation;
pub mod locale;
pub mod relay;
