//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `UpstreamModel` - Relay to the hosted language-model API
//! - `RelayClient` - Chat controller to the relay endpoint

mod relay_client;
mod upstream_model;

pub use relay_client::{RelayClient, RelayClientError, RelayReply, RelayRequest};
pub use upstream_model::{UpstreamError, UpstreamModel, UpstreamRequest};
