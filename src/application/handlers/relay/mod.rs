//! Relay handlers.

mod relay_message;

pub use relay_message::{RelayCommand, RelayError, RelayMessageHandler, RelayResult};
