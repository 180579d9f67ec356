//! Attempt outcomes and error definitions.

use std::error::Error as _;

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Content type relayed when the upstream does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Errors raised while building the upstream side of the proxy.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Neither a primary nor any fallback endpoint is configured.
    #[error("no upstream endpoints configured")]
    NoEndpoints,

    /// The outbound HTTP client could not be constructed.
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a single forwarding attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// No response within the attempt budget.
    #[error("Timeout")]
    Timeout,

    /// DNS, connect, TLS, or body read failure.
    #[error("{0}")]
    Transport(String),
}

impl AttemptError {
    /// Short label used in metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AttemptError::Timeout => "timeout",
            AttemptError::Transport(_) => "transport",
        }
    }
}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return AttemptError::Timeout;
        }

        // reqwest keeps the root cause (refused, DNS, TLS) in the source chain.
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        AttemptError::Transport(message)
    }
}

/// Diagnostic entry for one failed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedAttempt {
    pub url: String,
    pub error: String,
}

/// The first HTTP response obtained from an upstream, whatever its status.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub url: String,
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub body: Bytes,
}

/// Every endpoint failed at the transport level.
#[derive(Debug, Clone, Error)]
#[error("All upstream RPCs failed")]
pub struct ExhaustedError {
    /// One entry per endpoint, in attempt order.
    pub attempts: Vec<FailedAttempt>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_error_display() {
        assert_eq!(AttemptError::Timeout.to_string(), "Timeout");
        assert_eq!(
            AttemptError::Transport("connection refused".into()).to_string(),
            "connection refused"
        );
        assert_eq!(AttemptError::Timeout.kind(), "timeout");
    }

    #[test]
    fn test_failed_attempt_serializes_url_and_error() {
        let entry = FailedAttempt {
            url: "http://a".into(),
            error: "Timeout".into(),
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({ "url": "http://a", "error": "Timeout" })
        );
    }
}
