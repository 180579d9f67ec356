//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http + upstream subsystems produce:
//!     → logging.rs (structured log events, request ID in every span)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
