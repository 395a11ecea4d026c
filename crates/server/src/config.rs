use std::net::SocketAddr;
use std::path::PathBuf;

use vitrina_core::FetchConfig;

/// Default bind address, the usual development port for the form front end.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Default `RUST_LOG` filter.
pub const DEFAULT_LOG_FILTER: &str = "vitrina_server=info,vitrina_core=info,tower_http=info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var} value '{value}': {reason}")]
    InvalidVar { var: &'static str, value: String, reason: String },
}

/// Runtime settings for the web front end.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub fetch: FetchConfig,
    /// Site profile directory searched instead of the default ones.
    pub profile_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            fetch: FetchConfig::default(),
            profile_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads `VITRINA_BIND`, `VITRINA_FETCH_TIMEOUT` and `VITRINA_PROFILE_DIR`,
    /// keeping defaults for unset vars.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("VITRINA_BIND") {
            config.bind_addr = value.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidVar {
                var: "VITRINA_BIND",
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }

        if let Some(value) = lookup("VITRINA_FETCH_TIMEOUT") {
            config.fetch.timeout = value.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidVar {
                var: "VITRINA_FETCH_TIMEOUT",
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }

        if let Some(value) = lookup("VITRINA_PROFILE_DIR").filter(|dir| !dir.is_empty()) {
            config.profile_dir = Some(PathBuf::from(value));
        }

        Ok(config)
    }
}
