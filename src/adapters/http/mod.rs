//! HTTP adapters - REST API implementations.
//!
//! [`build_app`] assembles the full router: the relay endpoint, a health
//! check, body limit, tracing and CORS layers.

pub mod relay;

pub use relay::{relay_routes, ChatReplyResponse, ErrorResponse, RelayAppState};

use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;

/// Builds the application router from shared state and server settings.
pub fn build_app(state: RelayAppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(relay_routes(state))
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(build_cors(server))
        .layer(TraceLayer::new_for_http())
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// Permissive when no origins are configured, otherwise an allow-list.
fn build_cors(server: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let origins = server.cors_origins_list();
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let values: Vec<_> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::upstream::MockUpstreamModel;
    use crate::application::handlers::RelayMessageHandler;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(server: &ServerConfig) -> Router {
        let handler = RelayMessageHandler::new(Arc::new(MockUpstreamModel::new()));
        build_app(RelayAppState::new(Arc::new(handler)), server)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app(&ServerConfig::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cors_allow_list_echoes_configured_origin() {
        let server = ServerConfig {
            cors_origins: Some("http://localhost:3000".to_string()),
            ..Default::default()
        };

        let response = app(&server)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn permissive_cors_without_origins() {
        let response = app(&ServerConfig::default())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://anywhere.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
