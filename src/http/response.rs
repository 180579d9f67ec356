//! Response construction.
//!
//! # Responsibilities
//! - Mirror the upstream status, content type and body to the client
//! - Map proxy failures to their HTTP responses
//!
//! # Design Decisions
//! - Relayed bodies are byte-for-byte; nothing is re-encoded
//! - Upstream 4xx/5xx pass through unchanged; only exhaustion yields 502

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use crate::upstream::{ExhaustedError, UpstreamResponse};

/// Build the client response from an upstream response.
pub fn relay(upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    response.headers_mut().insert(CONTENT_TYPE, upstream.content_type);
    response
}

/// Failures surfaced to the proxy caller.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Empty or absent request body. No upstream was contacted.
    #[error("Missing JSON-RPC body")]
    MissingBody,

    /// Every upstream failed at the transport level.
    #[error(transparent)]
    Exhausted(#[from] ExhaustedError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::MissingBody => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing JSON-RPC body" })),
            )
                .into_response(),
            ProxyError::Exhausted(err) => (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": "Bad Gateway",
                    "message": err.to_string(),
                    "details": err.attempts,
                })),
            )
                .into_response(),
        }
    }
}
