//! Upstream model adapters.
//!
//! - `OnlySqProvider` - HTTP client for the OnlySq completion API
//! - `MockUpstreamModel` - Queued replies for tests

mod mock_provider;
mod onlysq_provider;

pub use mock_provider::MockUpstreamModel;
pub use onlysq_provider::{OnlySqConfig, OnlySqProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
