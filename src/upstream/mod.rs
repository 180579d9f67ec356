//! Upstream failover subsystem.
//!
//! # Data Flow
//! ```text
//! UpstreamConfig (primary + fallbacks)
//!     → endpoints.rs (ordered, immutable endpoint list)
//!     → failover.rs (sequential attempt loop, per-attempt timeout)
//!     → types.rs (first response, or every failure in order)
//! ```
//!
//! # Request State Machine
//! ```text
//! Start → TryEndpoint(0) ─response─→ Relay
//!              │ timeout / transport error
//!              ▼
//!         TryEndpoint(1) ─response─→ Relay
//!              │ ...
//!              ▼
//!         AllFailed → 502
//! ```
//!
//! # Design Decisions
//! - Payload is opaque bytes; no JSON-RPC parsing
//! - No state shared between requests; each starts at endpoint 0
//! - No endpoint is retried within one request

pub mod endpoints;
pub mod failover;
pub mod types;

pub use endpoints::EndpointList;
pub use failover::FailoverProxy;
pub use types::{
    AttemptError, ExhaustedError, FailedAttempt, UpstreamError, UpstreamResponse,
    DEFAULT_CONTENT_TYPE,
};
