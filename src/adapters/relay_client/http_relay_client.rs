//! HTTP relay client - Implementation of RelayClient over multipart POST.
//!
//! Form fields:
//! - `messages` - JSON array of `{role, content}`
//! - `target_index` - index of the message the files belong to
//! - `files` - one part per staged file

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::ports::{RelayClient, RelayClientError, RelayReply, RelayRequest};

/// Talks to a relay endpoint such as `http://localhost:8080/api/chat`.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    endpoint: String,
    client: Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpRelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    fn build_form(request: RelayRequest) -> Result<Form, RelayClientError> {
        let messages = serde_json::to_string(&request.messages)
            .map_err(|e| RelayClientError::InvalidRequest(e.to_string()))?;

        let mut form = Form::new().text("messages", messages);
        if let Some(index) = request.target_index {
            form = form.text("target_index", index.to_string());
        }

        for file in request.files {
            let name = file.name().to_string();
            let mime_type = file.mime_type().to_string();
            let part = Part::bytes(file.into_bytes()).file_name(name.clone());
            let part = match usable_mime(&mime_type) {
                Some(mime_type) => part
                    .mime_str(mime_type)
                    .map_err(|e| RelayClientError::InvalidRequest(e.to_string()))?,
                None => {
                    if !mime_type.is_empty() {
                        warn!(file = %name, %mime_type, "Invalid MIME type, sending file without one");
                    }
                    part
                }
            };
            form = form.part("files", part);
        }

        Ok(form)
    }
}

/// `mime_type` when a multipart part header would accept it.
fn usable_mime(mime_type: &str) -> Option<&str> {
    if mime_type.is_empty() {
        return None;
    }
    Part::bytes(Vec::new()).mime_str(mime_type).ok().map(|_| mime_type)
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, request: RelayRequest) -> Result<RelayReply, RelayClientError> {
        let form = Self::build_form(request)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RelayClientError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            debug!(status = status.as_u16(), ?message, "Relay returned error status");
            return Err(RelayClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<RelayReply>()
            .await
            .map_err(|e| RelayClientError::Decode(e.to_string()))
    }
}
