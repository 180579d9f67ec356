//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Public endpoints tried after the configured primary, in this order.
pub const DEFAULT_FALLBACK_URLS: [&str; 4] = [
    "https://testnet.somnia.network/",
    "https://devnet.somnia.network/",
    "https://dream-rpc.somnia.network/",
    "https://www.ankr.com/rpc/somnia/",
];

/// Root configuration for the RPC failover proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Inbound HTTP surface (paths, CORS, body limit).
    pub server: ServerConfig,

    /// Upstream JSON-RPC endpoints and attempt timeout.
    pub upstreams: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Inbound HTTP configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Path serving the proxy (POST) and its health acknowledgement (GET).
    pub rpc_path: String,

    /// Path of the liveness ping.
    pub ping_path: String,

    /// Message returned by the ping endpoint.
    pub ping_message: String,

    /// Allow cross-origin browser callers.
    pub cors_enabled: bool,

    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            rpc_path: "/api/rpc".to_string(),
            ping_path: "/api/ping".to_string(),
            ping_message: "ping".to_string(),
            cors_enabled: true,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Upstream endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Primary endpoint, tried before every fallback.
    pub primary_url: Option<String>,

    /// Fallback endpoints in the order they are tried.
    pub fallback_urls: Vec<String>,

    /// Per-attempt timeout in milliseconds. Reset for every endpoint.
    pub attempt_timeout_ms: u64,

    /// Route upstream calls through HTTP(S)_PROXY from the environment.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            primary_url: None,
            fallback_urls: DEFAULT_FALLBACK_URLS.iter().map(|u| u.to_string()).collect(),
            attempt_timeout_ms: 10_000,
            use_system_proxy: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
