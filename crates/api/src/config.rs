use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Listener settings read from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 8080;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `PORT` selects the port; unset or blank means [`Self::DEFAULT_PORT`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) if !raw.trim().is_empty() => {
                raw.trim()
                    .parse()
                    .map_err(|source| ConfigError::InvalidPort { value: raw.clone(), source })?
            }
            _ => Self::DEFAULT_PORT,
        };

        Ok(Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: Self::DEFAULT_PORT,
        }
    }
}
