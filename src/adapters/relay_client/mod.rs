//! Relay client adapters used by the chat controller.

mod http_relay_client;
mod mock_relay_client;

pub use http_relay_client::HttpRelayClient;
pub use mock_relay_client::MockRelayClient;
