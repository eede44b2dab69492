//! # Web Middleware
//!
//! Ambient request/response processing. The only middleware this service
//! needs is request correlation; authentication and rate limiting belong to
//! the infrastructure layer in front of it.

pub mod request_id;
