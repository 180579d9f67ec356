//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID for log correlation)
//!     → handlers.rs (GET health / POST proxy / ping)
//!     → [upstream failover loop]
//!     → response.rs (verbatim relay or error document)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ProxyError;
pub use server::{AppState, HttpServer, ServerError};
