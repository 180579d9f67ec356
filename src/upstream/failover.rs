//! Sequential failover across upstream JSON-RPC endpoints.
//!
//! # Responsibilities
//! - Forward the opaque payload to each endpoint in order
//! - Bound every attempt with its own timeout
//! - Stop at the first HTTP response, whatever its status
//! - Collect per-endpoint failures when nothing answers
//!
//! # Design Decisions
//! - Attempts are strictly sequential, never raced
//! - The timer is attempt-scoped: each endpoint gets the full budget
//! - Dropping a timed-out request future cancels it and frees its connection
//! - Upstream 4xx/5xx are relayed, not retried

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use tokio::time::timeout;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::endpoints::EndpointList;
use crate::upstream::types::{
    AttemptError, ExhaustedError, FailedAttempt, UpstreamError, UpstreamResponse,
    DEFAULT_CONTENT_TYPE,
};

/// Forwards JSON-RPC payloads to the first upstream that answers.
#[derive(Debug, Clone)]
pub struct FailoverProxy {
    endpoints: EndpointList,
    client: reqwest::Client,
    attempt_timeout: Duration,
}

impl FailoverProxy {
    /// Build the proxy from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let endpoints = EndpointList::new(config.primary_url.as_deref(), &config.fallback_urls)?;

        let mut builder = reqwest::Client::builder();
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        tracing::info!(
            primary = %endpoints.primary(),
            endpoints = endpoints.len(),
            attempt_timeout_ms = config.attempt_timeout_ms,
            "Upstream endpoints configured"
        );

        Ok(Self {
            endpoints,
            client,
            attempt_timeout: Duration::from_millis(config.attempt_timeout_ms),
        })
    }

    /// The endpoint every request tries first.
    pub fn primary(&self) -> &str {
        self.endpoints.primary()
    }

    pub fn endpoints(&self) -> &EndpointList {
        &self.endpoints
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    /// Forward `payload` to each endpoint in order until one responds.
    ///
    /// Returns the first upstream response untouched, or every failure in
    /// attempt order once the list is exhausted.
    pub async fn forward(&self, payload: Bytes) -> Result<UpstreamResponse, ExhaustedError> {
        let mut failures = Vec::with_capacity(self.endpoints.len());

        for url in self.endpoints.iter() {
            let started = Instant::now();
            match self.attempt(url, payload.clone()).await {
                Ok(response) => {
                    metrics::record_attempt(url, "response");
                    tracing::debug!(
                        upstream = %url,
                        status = %response.status,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Upstream responded"
                    );
                    return Ok(response);
                }
                Err(error) => {
                    metrics::record_attempt(url, error.kind());
                    tracing::warn!(
                        upstream = %url,
                        error = %error,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Upstream attempt failed, trying next endpoint"
                    );
                    failures.push(FailedAttempt {
                        url: url.to_string(),
                        error: error.to_string(),
                    });
                }
            }
        }

        tracing::error!(
            attempts = failures.len(),
            details = ?failures,
            "RPC proxy: all upstreams failed"
        );
        Err(ExhaustedError { attempts: failures })
    }

    /// One bounded attempt against a single endpoint.
    async fn attempt(&self, url: &str, payload: Bytes) -> Result<UpstreamResponse, AttemptError> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, DEFAULT_CONTENT_TYPE)
            .body(payload);

        let response = timeout(self.attempt_timeout, request.send())
            .await
            .map_err(|_| AttemptError::Timeout)??;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        // Headers arrived; the body read gets a fresh budget of its own.
        let body = timeout(self.attempt_timeout, response.bytes())
            .await
            .map_err(|_| AttemptError::Timeout)??;

        Ok(UpstreamResponse {
            url: url.to_string(),
            status,
            content_type,
            body,
        })
    }
}
