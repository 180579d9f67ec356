//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use rpc_failover_proxy::config::ProxyConfig;
use rpc_failover_proxy::http::HttpServer;
use rpc_failover_proxy::lifecycle::Shutdown;

/// What a mock upstream answers with.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
    /// Delay before the response headers are written.
    pub delay: Duration,
    /// Advertised Content-Length, when it should differ from the body sent.
    pub declared_length: Option<usize>,
    /// Delay between the headers and the body.
    pub body_delay: Duration,
}

impl MockReply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.to_string(),
            delay: Duration::ZERO,
            declared_length: None,
            body_delay: Duration::ZERO,
        }
    }

    pub fn with_content_type(mut self, content_type: Option<&'static str>) -> Self {
        self.content_type = content_type;
        self
    }

    /// Advertises more body than it sends, then closes the connection.
    pub fn truncated(declared_length: usize, partial: &str) -> Self {
        Self {
            declared_length: Some(declared_length),
            ..Self::json(200, partial)
        }
    }

    /// Sends the headers at once, then stalls before the body.
    pub fn stalled_body() -> Self {
        Self {
            body_delay: Duration::from_secs(60),
            ..Self::json(200, r#"{"result":"late"}"#)
        }
    }

    /// Never answers within any reasonable attempt timeout.
    pub fn silent() -> Self {
        Self {
            delay: Duration::from_secs(60),
            ..Self::json(200, "{}")
        }
    }
}

/// A request as seen by a mock upstream.
#[derive(Debug, Clone)]
pub struct Received {
    /// Lower-cased request line and headers.
    pub head: String,
    pub body: Vec<u8>,
}

/// A running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    calls: Arc<AtomicU32>,
    received: Arc<Mutex<Vec<Received>>>,
}

impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

/// Start a mock upstream that reads each request fully, then replies.
pub async fn start_upstream(reply: MockReply) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicU32::new(0));
    let received = Arc::new(Mutex::new(Vec::new()));

    let (c, r) = (calls.clone(), received.clone());
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let reply = reply.clone();
                    let (c, r) = (c.clone(), r.clone());
                    tokio::spawn(async move {
                        let Ok(request) = read_request(&mut socket).await else {
                            return;
                        };
                        c.fetch_add(1, Ordering::SeqCst);
                        r.lock().unwrap().push(request);

                        tokio::time::sleep(reply.delay).await;

                        let reason = StatusCode::from_u16(reply.status)
                            .ok()
                            .and_then(|s| s.canonical_reason())
                            .unwrap_or("Unknown");
                        let content_type = reply
                            .content_type
                            .map(|ct| format!("Content-Type: {}\r\n", ct))
                            .unwrap_or_default();
                        let head = format!(
                            "HTTP/1.1 {} {}\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n",
                            reply.status,
                            reason,
                            content_type,
                            reply.declared_length.unwrap_or(reply.body.len()),
                        );
                        if socket.write_all(head.as_bytes()).await.is_err() {
                            return;
                        }
                        let _ = socket.flush().await;
                        tokio::time::sleep(reply.body_delay).await;
                        let _ = socket.write_all(reply.body.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream { addr, calls, received }
}

async fn read_request(socket: &mut TcpStream) -> std::io::Result<Received> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = head_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = (body_start + content_length).min(buf.len());

    Ok(Received {
        head,
        body: buf[body_start..body_end].to_vec(),
    })
}

/// A URL nothing listens on (connection refused).
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

/// Proxy config pointing only at the given endpoints.
pub fn proxy_config(primary: Option<String>, fallbacks: Vec<String>, attempt_timeout_ms: u64) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstreams.primary_url = primary;
    config.upstreams.fallback_urls = fallbacks;
    config.upstreams.attempt_timeout_ms = attempt_timeout_ms;
    config.upstreams.use_system_proxy = false;
    config
}

/// Start the proxy on an ephemeral port. Returns the RPC URL and its shutdown handle.
pub async fn start_proxy(config: ProxyConfig) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let rpc_path = config.server.rpc_path.clone();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}{}", addr, rpc_path), shutdown)
}

/// Test client that never goes through an environment proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
