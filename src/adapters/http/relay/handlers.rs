//! HTTP handlers for the relay endpoint.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, warn};

use crate::application::handlers::{RelayError, RelayMessageHandler};
use crate::domain::relay::DEFAULT_UPSTREAM_ERROR;
use crate::ports::UpstreamError;

use super::dto::{ChatReplyResponse, ErrorResponse};
use super::multipart::read_relay_command;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RelayAppState {
    handler: Arc<RelayMessageHandler>,
}

impl RelayAppState {
    pub fn new(handler: Arc<RelayMessageHandler>) -> Self {
        Self { handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Relay a conversation with attachments upstream
pub async fn relay_chat(
    State(state): State<RelayAppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            return handle_relay_error(RelayError::malformed(rejection.body_text()));
        }
    };

    let cmd = match read_relay_command(multipart).await {
        Ok(cmd) => cmd,
        Err(e) => return handle_relay_error(e),
    };

    match state.handler.handle(cmd).await {
        Ok(result) => {
            info!(
                attached = result.attached,
                skipped = result.skipped,
                "Relay request completed"
            );
            (StatusCode::OK, Json(ChatReplyResponse { text: result.text })).into_response()
        }
        Err(e) => handle_relay_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Upstream rejections surface as 400 with their message; everything else
/// is a generic 500.
fn handle_relay_error(error: RelayError) -> Response {
    match error {
        RelayError::UpstreamRejected(message) => {
            warn!(%message, "Upstream returned an error reply");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
        }
        RelayError::Upstream(UpstreamError::Rejected { status }) => {
            warn!(status, "Upstream rejected request");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(DEFAULT_UPSTREAM_ERROR)),
            )
                .into_response()
        }
        other => {
            error!(error = %other, "Error in chat relay");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal()),
            )
                .into_response()
        }
    }
}
