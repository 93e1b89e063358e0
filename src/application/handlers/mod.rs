//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod relay;

pub use relay::{RelayCommand, RelayError, RelayMessageHandler, RelayResult};
