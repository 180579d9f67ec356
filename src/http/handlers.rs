//! Route handlers.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Json, Response};
use serde_json::{json, Value};

use crate::http::request::request_id;
use crate::http::response::{relay, ProxyError};
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET {rpc_path}`: acknowledge liveness and name the primary upstream.
///
/// Never contacts an upstream.
pub async fn rpc_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "ok": true, "rpc": state.proxy.primary() }))
}

/// `POST {rpc_path}`: forward the payload through the failover loop.
pub async fn proxy_rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    if body.iter().all(u8::is_ascii_whitespace) {
        tracing::warn!(request_id = %request_id, "Rejecting request without JSON-RPC body");
        metrics::record_request("missing_body", start);
        return Err(ProxyError::MissingBody);
    }

    tracing::debug!(request_id = %request_id, bytes = body.len(), "Proxying JSON-RPC payload");

    match state.proxy.forward(body).await {
        Ok(upstream) => {
            tracing::debug!(
                request_id = %request_id,
                upstream = %upstream.url,
                status = %upstream.status,
                "Relaying upstream response"
            );
            metrics::record_request("relayed", start);
            Ok(relay(upstream))
        }
        Err(err) => {
            tracing::debug!(
                request_id = %request_id,
                attempts = err.attempts.len(),
                "Returning 502"
            );
            metrics::record_request("exhausted", start);
            Err(err.into())
        }
    }
}

/// `GET {ping_path}`
pub async fn ping(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "message": &*state.ping_message }))
}
