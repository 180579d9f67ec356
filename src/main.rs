//! JSON-RPC Failover Proxy
//!
//! Accepts JSON-RPC payloads from browser clients and forwards them to the
//! first upstream RPC endpoint that answers.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │              RPC FAILOVER PROXY              │
//!   Browser               │                                              │
//!   POST /api/rpc ────────┼─▶ http server ──▶ upstream failover loop ────┼──▶ primary RPC
//!                         │   (request id,     (sequential, per-attempt  │      │ timeout/error
//!                         │    cors, limits)    timeout)                 │      ▼
//!   ◀── relayed response ─┼── response.rs ◀── first HTTP response ◀──────┼──── fallback 1..n
//!       or 502 + details  │                                              │
//!                         │   config · observability · lifecycle         │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use rpc_failover_proxy::config::{load_config, load_env_file, CliOverrides};
use rpc_failover_proxy::http::HttpServer;
use rpc_failover_proxy::lifecycle::{shutdown_on_signal, Shutdown};
use rpc_failover_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "rpc-failover-proxy")]
#[command(about = "JSON-RPC proxy with sequential upstream failover", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dotenv file to load before reading the environment (default: `.env`).
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let env_file = load_env_file(args.env_file.as_deref())?;
    let cli = CliOverrides {
        bind_address: args.bind,
    };
    let config = load_config(args.config.as_deref(), &cli)?;

    logging::init_logging(&config.observability);

    if let Some(path) = env_file {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    tracing::info!("rpc-failover-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        primary = config.upstreams.primary_url.as_deref().unwrap_or("<default>"),
        fallbacks = config.upstreams.fallback_urls.len(),
        attempt_timeout_ms = config.upstreams.attempt_timeout_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config)?;

    let signals = shutdown.clone();
    tokio::spawn(async move {
        shutdown_on_signal(&signals).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
