//! # Server Error Types
//!
//! Unified error handling for configuration and bootstrap. Request handlers
//! are infallible by construction (both endpoints always answer 200), so
//! these errors can only surface before the server starts accepting traffic.

use thiserror::Error;

/// Server operation result type
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Error types for server startup and configuration
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid bind address '{address}': {reason}")]
    InvalidBindAddress { address: String, reason: String },

    #[error("Failed to build metadata client: {0}")]
    MetadataClient(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an invalid bind address error
    pub fn invalid_bind_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBindAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }
}
