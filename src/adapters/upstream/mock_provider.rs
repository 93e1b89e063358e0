//! Mock upstream model for testing.
//!
//! Replies are queued as raw JSON bodies and go through the same
//! classification as the real provider, so tests exercise every reply shape
//! without a network.
//!
//! # Example
//!
//! ```ignore
//! let upstream = MockUpstreamModel::new()
//!     .with_body(json!({"choices": [{"message": {"content": "hi"}}]}));
//!
//! let reply = upstream.complete(request).await?;
//! assert_eq!(reply, UpstreamReply::ChatCompletion { content: "hi".into() });
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::relay::UpstreamReply;
use crate::ports::{UpstreamError, UpstreamModel, UpstreamRequest};

/// A configured mock reply.
#[derive(Debug, Clone)]
enum MockReply {
    Body(Value),
    Error(UpstreamError),
}

/// Mock upstream model. Clones share the queue and the call history.
#[derive(Debug, Clone)]
pub struct MockUpstreamModel {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<UpstreamRequest>>>,
    delay: Duration,
    model: String,
}

impl Default for MockUpstreamModel {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockUpstreamModel {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
            model: "mock-model".to_string(),
        }
    }

    /// Queues a JSON body to be classified on the next call.
    pub fn with_body(self, body: Value) -> Self {
        lock(&self.replies).push_back(MockReply::Body(body));
        self
    }

    /// Queues a transport-level error.
    pub fn with_error(self, error: UpstreamError) -> Self {
        lock(&self.replies).push_back(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<UpstreamRequest> {
        lock(&self.calls).last().cloned()
    }

    fn next_reply(&self) -> MockReply {
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| MockReply::Body(serde_json::json!({"text": "Mock response"})))
    }
}

#[async_trait]
impl UpstreamModel for MockUpstreamModel {
    async fn complete(&self, request: UpstreamRequest) -> Result<UpstreamReply, UpstreamError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Body(body) => Ok(UpstreamReply::classify(&body)),
            MockReply::Error(err) => Err(err),
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{Role, WireMessage};
    use serde_json::json;

    fn request() -> UpstreamRequest {
        UpstreamRequest::new(vec![WireMessage::new(Role::User, "Hello")])
    }

    #[tokio::test]
    async fn returns_bodies_in_order_then_default() {
        let upstream = MockUpstreamModel::new()
            .with_body(json!({"text": "First"}))
            .with_body(json!({"answer": "Second"}));

        let r1 = upstream.complete(request()).await.unwrap();
        let r2 = upstream.complete(request()).await.unwrap();
        let r3 = upstream.complete(request()).await.unwrap();

        assert_eq!(r1, UpstreamReply::Text("First".into()));
        assert_eq!(r2, UpstreamReply::Answer("Second".into()));
        assert_eq!(r3, UpstreamReply::Text("Mock response".into()));
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let upstream = MockUpstreamModel::new().with_error(UpstreamError::Timeout { timeout_secs: 5 });

        let result = upstream.complete(request()).await;

        assert_eq!(result, Err(UpstreamError::Timeout { timeout_secs: 5 }));
    }

    #[tokio::test]
    async fn clones_share_call_history() {
        let upstream = MockUpstreamModel::new();
        let handle = upstream.clone();

        upstream.complete(request()).await.unwrap();

        assert_eq!(handle.call_count(), 1);
        assert_eq!(handle.last_call(), Some(request()));
    }
}
