//! # Server Configuration
//!
//! Environment-variable driven configuration with sensible defaults.
//! Deployment-level settings (bind address, timeouts, metadata endpoint)
//! live outside the code; the service is meant to run behind a reverse
//! proxy or orchestrator that owns them.
//!
//! All variables are optional:
//!
//! | Variable | Default |
//! |---|---|
//! | `INFO_SERVER_BIND_ADDRESS` | `0.0.0.0:8080` |
//! | `INFO_SERVER_REQUEST_TIMEOUT_MS` | `5000` |
//! | `INFO_SERVER_METADATA_BASE_URL` | `http://169.254.169.254` |
//! | `INFO_SERVER_METADATA_TIMEOUT_MS` | `1000` |
//! | `INFO_SERVER_METADATA_CONNECT_TIMEOUT_MS` | `500` |

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Web server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to, e.g. "0.0.0.0:8080"
    pub bind_address: String,
    /// Whole-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Instance metadata client configuration
    pub metadata: MetadataConfig,
}

/// Configuration for the instance metadata (IMDS) client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Base URL of the metadata service, e.g. "<http://169.254.169.254>"
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Requested lifetime for IMDSv2 session tokens, in seconds
    pub token_ttl_seconds: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_ms: 5000,
            metadata: MetadataConfig::default(),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            base_url: "http://169.254.169.254".to_string(),
            timeout_ms: 1000,
            connect_timeout_ms: 500,
            token_ttl_seconds: 21600,
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> ServerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// This is the testable entry point: tests supply a closure instead of
    /// mutating global process environment.
    pub fn from_lookup<F>(lookup: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(address) = lookup("INFO_SERVER_BIND_ADDRESS") {
            config.bind_address = address;
        }
        if let Some(raw) = lookup("INFO_SERVER_REQUEST_TIMEOUT_MS") {
            config.request_timeout_ms = parse_millis("INFO_SERVER_REQUEST_TIMEOUT_MS", &raw)?;
        }
        if let Some(url) = lookup("INFO_SERVER_METADATA_BASE_URL") {
            config.metadata.base_url = url;
        }
        if let Some(raw) = lookup("INFO_SERVER_METADATA_TIMEOUT_MS") {
            config.metadata.timeout_ms = parse_millis("INFO_SERVER_METADATA_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = lookup("INFO_SERVER_METADATA_CONNECT_TIMEOUT_MS") {
            config.metadata.connect_timeout_ms =
                parse_millis("INFO_SERVER_METADATA_CONNECT_TIMEOUT_MS", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> ServerResult<()> {
        self.bind_address
            .parse::<SocketAddr>()
            .map_err(|e| ServerError::invalid_bind_address(&self.bind_address, e.to_string()))?;

        if self.request_timeout_ms == 0 {
            return Err(ServerError::configuration(
                "request_timeout_ms must be greater than zero",
            ));
        }
        self.metadata.validate()
    }
}

impl MetadataConfig {
    /// Validate the metadata client configuration.
    pub fn validate(&self) -> ServerResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ServerError::configuration(format!(
                "metadata base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 || self.connect_timeout_ms == 0 {
            return Err(ServerError::configuration(
                "metadata timeouts must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Parse a millisecond duration environment value.
fn parse_millis(key: &str, raw: &str) -> ServerResult<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        ServerError::configuration(format!("{key} must be a positive integer, got '{raw}'"))
    })
}
