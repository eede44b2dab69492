#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Instance Info Server
//!
//! Small axum web service that reports the identity of the host it runs on:
//! the container hostname plus, when running on EC2, the instance ID and
//! availability zone fetched from the instance metadata service. A JSON
//! liveness endpoint makes the service easy to wire into orchestrator
//! health probes.
//!
//! Every request is stateless and idempotent; a failed metadata lookup
//! degrades to placeholder values instead of an error response.
//!
//! ## Module Organization
//!
//! - [`config`] - Environment-driven server and metadata-client configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging initialization
//! - [`metadata`] - EC2 instance metadata (IMDS) client
//! - [`web`] - Router, handlers, shared state, and middleware
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use instance_info::web::{self, state::AppState};
//! use instance_info::ServerConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let bind_address = config.bind_address.clone();
//! let app = web::create_app(AppState::from_config(config)?);
//!
//! let listener = tokio::net::TcpListener::bind(&bind_address).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod web;

pub use config::{MetadataConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use metadata::{InstanceIdentity, MetadataClient, MetadataError};
