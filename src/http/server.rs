//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, body limit)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::handlers::{ping, proxy_rpc, rpc_health};
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::upstream::{FailoverProxy, UpstreamError};

/// Error type for server construction.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("upstream setup failed: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<FailoverProxy>,
    pub ping_message: Arc<str>,
}

/// HTTP server for the RPC failover proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let proxy = Arc::new(FailoverProxy::new(&config.upstreams)?);

        let state = AppState {
            proxy,
            ping_message: config.server.ping_message.as_str().into(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let router = Router::new()
            .route(&config.server.rpc_path, get(rpc_health).post(proxy_rpc))
            .route(&config.server.ping_path, get(ping))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.server.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            path = %request.uri().path(),
                            request_id = %request_id(request.headers()),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            );

        if config.server.cors_enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// A handle to the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rpc_path = %self.config.server.rpc_path,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
