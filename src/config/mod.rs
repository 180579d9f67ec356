//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, into the process environment)
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → handed to HttpServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the endpoint list never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_env_file, CliOverrides, ConfigError};
pub use schema::ProxyConfig;
pub use schema::ListenerConfig;
pub use schema::ServerConfig;
pub use schema::UpstreamConfig;
pub use schema::ObservabilityConfig;
pub use schema::LogFormat;
