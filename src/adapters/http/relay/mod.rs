//! HTTP adapter for the chat relay endpoint.

mod dto;
mod handlers;
mod multipart;
mod routes;

pub use dto::{ChatReplyResponse, ErrorResponse};
pub use handlers::RelayAppState;
pub use routes::relay_routes;
