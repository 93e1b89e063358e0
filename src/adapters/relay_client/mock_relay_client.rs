//! Mock relay client for testing the chat controller.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{RelayClient, RelayClientError, RelayReply, RelayRequest};

/// Returns queued results in order and records every request.
///
/// An empty queue answers `RelayReply::Text("Mock response")`.
#[derive(Debug, Clone, Default)]
pub struct MockRelayClient {
    results: Arc<Mutex<VecDeque<Result<RelayReply, RelayClientError>>>>,
    requests: Arc<Mutex<Vec<RelayRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockRelayClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: RelayReply) -> Self {
        lock(&self.results).push_back(Ok(reply));
        self
    }

    pub fn with_error(self, error: RelayClientError) -> Self {
        lock(&self.results).push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn requests(&self) -> Vec<RelayRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl RelayClient for MockRelayClient {
    async fn send(&self, request: RelayRequest) -> Result<RelayReply, RelayClientError> {
        lock(&self.requests).push(request);
        lock(&self.results)
            .pop_front()
            .unwrap_or_else(|| Ok(RelayReply::Text("Mock response".to_string())))
    }
}
