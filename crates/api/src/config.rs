//! Environment-driven configuration.

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

/// Socket address the server listens on.
pub const BIND_ADDR_ENV: &str = "PRODUCTD_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {source}")]
    InvalidBindAddr {
        var: &'static str,
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
}

impl ApiConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup (tests pass a closure over a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup(BIND_ADDR_ENV) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr {
                    var: BIND_ADDR_ENV,
                    value,
                    source,
                })?,
            None => {
                tracing::debug!("{BIND_ADDR_ENV} not set; using {DEFAULT_BIND_ADDR}");
                default_bind_addr()
            }
        };

        Ok(Self { bind_addr })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}
