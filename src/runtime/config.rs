//! # Endpoint Configuration
//!
//! The inventory and store services are configured independently. Deployments
//! that serve both from one host use [`PetstoreConfig::shared`], or set only
//! `PETSTORE_URL` in the environment.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `PETSTORE_URL` | Base URL for both services |
//! | `PETSTORE_INVENTORY_URL` | Overrides the base URL for pet lookups |
//! | `PETSTORE_STORE_URL` | Overrides the base URL for order placement |
//! | `PETSTORE_TIMEOUT_SECS` | Per-request timeout, default 30 |
//! | `PETSTORE_USER_AGENT` | Optional `User-Agent` override |

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

use crate::clients::{ApiClient, InventoryClient, OrderClient};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors raised while turning configuration into clients.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),

    #[error("invalid {field} {value:?}: {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid request timeout {0:?}")]
    InvalidTimeout(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Where the two petstore services live and how to reach them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PetstoreConfig {
    pub inventory_url: String,
    pub store_url: String,
    /// Read from `request_timeout_secs` when deserialized.
    #[serde(
        rename = "request_timeout_secs",
        default = "default_timeout",
        deserialize_with = "deserialize_secs"
    )]
    pub request_timeout: Duration,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
}

fn deserialize_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_secs)
}

impl PetstoreConfig {
    pub fn new(inventory_url: impl Into<String>, store_url: impl Into<String>) -> Self {
        Self {
            inventory_url: inventory_url.into(),
            store_url: store_url.into(),
            request_timeout: default_timeout(),
            user_agent: None,
        }
    }

    /// Both services behind one base URL.
    pub fn shared(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self::new(base_url.clone(), base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let shared = lookup("PETSTORE_URL");
        let inventory_url = lookup("PETSTORE_INVENTORY_URL")
            .or_else(|| shared.clone())
            .ok_or(ConfigError::Missing("PETSTORE_INVENTORY_URL or PETSTORE_URL"))?;
        let store_url = lookup("PETSTORE_STORE_URL")
            .or(shared)
            .ok_or(ConfigError::Missing("PETSTORE_STORE_URL or PETSTORE_URL"))?;

        let request_timeout = match lookup("PETSTORE_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            None => default_timeout(),
        };

        let config = Self {
            inventory_url,
            store_url,
            request_timeout,
            user_agent: lookup("PETSTORE_USER_AGENT"),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that both URLs are absolute http(s) URLs and the timeout is non-zero.
    pub fn validate(&self) -> Result<(Url, Url), ConfigError> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(format!("{:?}", self.request_timeout)));
        }
        let inventory = parse_url("inventory_url", &self.inventory_url)?;
        let store = parse_url("store_url", &self.store_url)?;
        Ok((inventory, store))
    }

    /// Builds one HTTP client per service, sharing a connection pool.
    pub fn build_clients(&self) -> Result<(InventoryClient, OrderClient), ConfigError> {
        let (inventory_url, store_url) = self.validate()?;

        let http = reqwest::Client::builder()
            .timeout(self.request_timeout())
            .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        debug!(%inventory_url, %store_url, "Petstore clients configured");
        Ok((
            InventoryClient::new(ApiClient::new(inventory_url, http.clone())),
            OrderClient::new(ApiClient::new(store_url, http)),
        ))
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}
