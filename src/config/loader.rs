//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the primary upstream endpoint.
pub const ENV_PRIMARY_RPC_URL: &str = "SOMNIA_RPC_URL";

/// Environment variable overriding the ping message.
pub const ENV_PING_MESSAGE: &str = "PING_MESSAGE";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
}

/// Load a dotenv file into the process environment.
///
/// With no path, `.env` is searched from the working directory upwards.
/// Variables already set in the environment win. A missing file is not an
/// error and yields `Ok(None)`.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load configuration from an optional TOML file, apply environment and
/// command-line overrides, then validate.
pub fn load_config(path: Option<&Path>, cli: &CliOverrides) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    if let Some(bind) = &cli.bind_address {
        config.listener.bind_address = bind.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Blank values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_blank(ENV_PRIMARY_RPC_URL) {
        tracing::debug!(url = %url, "Primary upstream overridden from environment");
        config.upstreams.primary_url = Some(url);
    }
    if let Some(message) = non_blank(ENV_PING_MESSAGE) {
        config.server.ping_message = message;
    }
}
