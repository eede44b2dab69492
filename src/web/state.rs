//! # Web Application State
//!
//! Shared state for request handlers. Nothing here is mutable: the
//! configuration and the metadata client are built once at startup and
//! shared read-only across connections, so no locking discipline is
//! needed anywhere in the request path.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::metadata::MetadataClient;

/// Shared application state for the web API
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Client for the instance metadata service
    pub metadata: Arc<MetadataClient>,
}

impl AppState {
    /// Build application state from a validated configuration.
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let metadata = MetadataClient::new(&config.metadata)?;

        Ok(Self {
            config: Arc::new(config),
            metadata: Arc::new(metadata),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_default_config() {
        let state = AppState::from_config(ServerConfig::default()).unwrap();
        assert_eq!(state.config.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_state_is_cheaply_cloneable() {
        let state = AppState::from_config(ServerConfig::default()).unwrap();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.config, &clone.config));
        assert!(Arc::ptr_eq(&state.metadata, &clone.metadata));
    }
}
