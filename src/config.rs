//! Process configuration read from the environment.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("cannot determine install root: {0}")]
    Root(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// JSON file holding the todo collection.
    pub data_file: PathBuf,
    /// Directory the browser UI is served from.
    pub public_dir: PathBuf,
}

impl Config {
    pub const DEFAULT_PORT: u16 = 5173;

    /// Defaults for an install rooted at `root`.
    pub fn with_root(root: &Path) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: Self::DEFAULT_PORT,
            data_file: root.join("data").join("todos.json"),
            public_dir: root.join("public"),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset and empty values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let root = match var("TODO_ROOT") {
            Some(root) => PathBuf::from(root),
            None => std::env::current_dir()?,
        };
        let mut config = Self::with_root(&root);

        if let Some(port) = var("PORT") {
            config.port = port.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue { key: "PORT", message: e.to_string() })?;
        }
        if let Some(host) = var("HOST") {
            config.host = host.trim().parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue { key: "HOST", message: e.to_string() })?;
        }
        if let Some(path) = var("TODO_DATA_PATH") { config.data_file = PathBuf::from(path); }
        if let Some(path) = var("PUBLIC_DIR") { config.public_dir = PathBuf::from(path); }
        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }
}
