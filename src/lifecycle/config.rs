//! Client configuration.
//!
//! Every field has a default, so an empty file (or no file at all) gives a client for a
//! backend on `localhost:8080`:
//!
//! ```toml
//! base_url = "http://localhost:8080"
//! request_timeout_secs = 10
//! stale_policy = "latest_issued"
//!
//! products_path = "/api/products"
//! orders_path = "/api/orders"
//! inventory_path = "/api/inventory/stock"
//! auth_path = "/api/auth"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sync_framework::{StalePolicy, TransportError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to build transport: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Backend origin, without a trailing path.
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
    #[serde(default = "defaults::products_path")]
    pub products_path: String,
    #[serde(default = "defaults::orders_path")]
    pub orders_path: String,
    #[serde(default = "defaults::inventory_path")]
    pub inventory_path: String,
    #[serde(default = "defaults::auth_path")]
    pub auth_path: String,
    /// Unset means requests may hang indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub stale_policy: StalePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            products_path: defaults::products_path(),
            orders_path: defaults::orders_path(),
            inventory_path: defaults::inventory_path(),
            auth_path: defaults::auth_path(),
            request_timeout_secs: None,
            stale_policy: StalePolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(?path, "Loading client config");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Uses `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

mod defaults {
    pub(crate) fn base_url() -> String {
        "http://localhost:8080".to_string()
    }

    pub(crate) fn products_path() -> String {
        "/api/products".to_string()
    }

    pub(crate) fn orders_path() -> String {
        "/api/orders".to_string()
    }

    pub(crate) fn inventory_path() -> String {
        "/api/inventory/stock".to_string()
    }

    pub(crate) fn auth_path() -> String {
        "/api/auth".to_string()
    }
}
