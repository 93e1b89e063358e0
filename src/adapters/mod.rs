//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `http` - axum router exposing the relay endpoint
//! - `upstream` - OnlySq API client and a mock
//! - `relay_client` - HTTP client for the relay endpoint and a mock

pub mod http;
pub mod relay_client;
pub mod upstream;

pub use http::{build_app, RelayAppState};
pub use relay_client::{HttpRelayClient, MockRelayClient};
pub use upstream::{MockUpstreamModel, OnlySqConfig, OnlySqProvider};
