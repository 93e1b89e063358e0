//! Chat Relay - Conversational chat client and stateless relay endpoint
//!
//! The client side keeps a conversation with file attachments and submits it
//! to the relay. The relay folds attachment details into the conversation,
//! forwards it to a hosted language-model API and normalizes the reply.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
