//! HTTP routes for the relay endpoint.

use axum::{routing::post, Router};

use super::handlers::{relay_chat, RelayAppState};

/// Creates the relay router. Mount at the application root.
pub fn relay_routes(state: RelayAppState) -> Router {
    Router::new()
        .route("/api/chat", post(relay_chat))
        .with_state(state)
}
