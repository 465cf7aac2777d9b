//! Server configuration parsed from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ASSETS_DIR: &str = "chantiers";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("ASSETS_DIR is set but empty")]
    EmptyAssetsDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Root folder holding one subdirectory per project.
    pub assets_dir: PathBuf,
}

impl ServerConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `ASSETS_DIR`: default `chantiers`, relative to the working directory
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("ASSETS_DIR").ok().as_deref(),
        )
    }

    fn from_vars(port: Option<&str>, assets_dir: Option<&str>) -> Result<Self, ConfigError> {
        let port = match port {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value: raw.to_string(), source })?,
        };
        let assets_dir = match assets_dir.map(str::trim) {
            None => PathBuf::from(DEFAULT_ASSETS_DIR),
            Some("") => return Err(ConfigError::EmptyAssetsDir),
            Some(dir) => PathBuf::from(dir),
        };
        Ok(Self { port, assets_dir })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
