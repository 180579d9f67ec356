//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are
//! reported together rather than stopping at the first.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("{field} must start with '/', got '{value}'")]
    Path { field: &'static str, value: String },

    #[error("invalid upstream URL '{url}': {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error("rpc_path and ping_path must differ, both are '{0}'")]
    PathConflict(String),

    #[error("no upstream endpoints configured")]
    NoUpstreams,

    #[error("attempt_timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    for (field, value) in [
        ("rpc_path", &config.server.rpc_path),
        ("ping_path", &config.server.ping_path),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError::Path { field, value: value.clone() });
        }
    }

    if config.server.rpc_path == config.server.ping_path {
        errors.push(ValidationError::PathConflict(config.server.rpc_path.clone()));
    }

    if config.server.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let upstreams = &config.upstreams;
    let primary = upstreams
        .primary_url
        .as_deref()
        .filter(|u| !u.trim().is_empty());
    let mut count = 0;
    for url in primary.into_iter().chain(upstreams.fallback_urls.iter().map(String::as_str)) {
        count += 1;
        if let Err(reason) = check_upstream_url(url) {
            errors.push(ValidationError::UpstreamUrl { url: url.to_string(), reason });
        }
    }
    if count == 0 {
        errors.push(ValidationError::NoUpstreams);
    }

    if upstreams.attempt_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(config.observability.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
