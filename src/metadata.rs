//! # Instance Metadata Client
//!
//! Queries the EC2 instance metadata service (IMDS) for the identity of the
//! instance this process runs on. Lookups go straight to the well-known
//! link-local endpoint over HTTP with short connect and request timeouts,
//! so an unreachable metadata service delays only the requesting connection
//! and only briefly.
//!
//! The client speaks IMDSv2: it asks for a session token first and falls
//! back to unauthenticated (v1) requests when the token handshake is
//! rejected. A transport failure during the handshake fails the whole
//! lookup immediately; off-EC2 hosts shouldn't pay the timeout twice.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::config::MetadataConfig;
use crate::error::{ServerError, ServerResult};

const TOKEN_PATH: &str = "/latest/api/token";
const INSTANCE_ID_PATH: &str = "/latest/meta-data/instance-id";
const AVAILABILITY_ZONE_PATH: &str = "/latest/meta-data/placement/availability-zone";

const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";
const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";

/// Identity facts for the instance this process runs on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceIdentity {
    pub instance_id: String,
    pub availability_zone: String,
}

/// Failure modes of a metadata lookup.
///
/// Kept narrow on purpose: transport problems, timeouts, unexpected status
/// codes, and malformed bodies all mean "metadata unavailable" to the
/// caller. Anything outside this taxonomy is a bug and must not be
/// absorbed.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata request timed out: {path}")]
    Timeout { path: String },

    #[error("metadata request failed for {path}: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("metadata service returned {status} for {path}")]
    UnexpectedStatus { path: String, status: StatusCode },

    #[error("malformed metadata response for {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl MetadataError {
    fn from_reqwest(path: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                path: path.to_string(),
            }
        } else {
            Self::Http {
                path: path.to_string(),
                source,
            }
        }
    }

    fn malformed(path: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// HTTP client for the instance metadata service
#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: Client,
    base_url: String,
    token_ttl_seconds: u32,
}

impl MetadataClient {
    /// Build a client from configuration.
    ///
    /// The underlying connection pool is created once; per-request timeouts
    /// come from [`MetadataConfig`].
    pub fn new(config: &MetadataConfig) -> ServerResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .map_err(|e| ServerError::MetadataClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_ttl_seconds: config.token_ttl_seconds,
        })
    }

    /// Fetch instance ID and availability zone in one logical lookup.
    ///
    /// All-or-nothing: the caller either gets both values or a single error
    /// describing the first thing that went wrong. Callers are expected to
    /// degrade gracefully rather than propagate the error to clients.
    pub async fn fetch_identity(&self) -> Result<InstanceIdentity, MetadataError> {
        let token = self.fetch_token().await?;

        let instance_id = self.fetch_value(INSTANCE_ID_PATH, token.as_deref()).await?;
        let availability_zone = self
            .fetch_value(AVAILABILITY_ZONE_PATH, token.as_deref())
            .await?;

        Ok(InstanceIdentity {
            instance_id,
            availability_zone,
        })
    }

    /// Obtain an IMDSv2 session token.
    ///
    /// `Ok(None)` means the service answered but refused the handshake, so
    /// the caller should continue with unauthenticated v1 requests. A
    /// transport error is returned as-is: if the token endpoint is
    /// unreachable the data endpoints will be too.
    async fn fetch_token(&self) -> Result<Option<String>, MetadataError> {
        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        let response = self
            .client
            .put(&url)
            .header(TOKEN_TTL_HEADER, self.token_ttl_seconds)
            .send()
            .await
            .map_err(|e| MetadataError::from_reqwest(TOKEN_PATH, e))?;

        if !response.status().is_success() {
            debug!(
                status = %response.status(),
                "IMDSv2 token request rejected, falling back to v1"
            );
            return Ok(None);
        }

        let token = response
            .text()
            .await
            .map_err(|e| MetadataError::from_reqwest(TOKEN_PATH, e))?;
        let token = token.trim();

        if token.is_empty() {
            debug!("IMDSv2 token response empty, falling back to v1");
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }

    async fn fetch_value(&self, path: &str, token: Option<&str>) -> Result<String, MetadataError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(token) = token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MetadataError::from_reqwest(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::UnexpectedStatus {
                path: path.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MetadataError::from_reqwest(path, e))?;
        parse_value(path, &body)
    }
}

/// Strict parse of a metadata value body.
///
/// The service answers each leaf path with a single bare value. Anything
/// else (empty body, multiple lines) counts as malformed; no partial
/// extraction is attempted.
fn parse_value(path: &str, body: &str) -> Result<String, MetadataError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(MetadataError::malformed(path, "empty body"));
    }
    if trimmed.lines().count() > 1 {
        return Err(MetadataError::malformed(path, "expected a single line"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetadataConfig;

    #[test]
    fn test_parse_value_accepts_single_line() {
        let value = parse_value(INSTANCE_ID_PATH, "i-0123456789abcdef0").unwrap();
        assert_eq!(value, "i-0123456789abcdef0");
    }

    #[test]
    fn test_parse_value_trims_whitespace() {
        let value = parse_value(AVAILABILITY_ZONE_PATH, "us-east-1a\n").unwrap();
        assert_eq!(value, "us-east-1a");
    }

    #[test]
    fn test_parse_value_rejects_empty_body() {
        let error = parse_value(INSTANCE_ID_PATH, "   \n").unwrap_err();
        assert!(matches!(error, MetadataError::Malformed { .. }));
    }

    #[test]
    fn test_parse_value_rejects_multiple_lines() {
        let error = parse_value(INSTANCE_ID_PATH, "i-abc\ni-def").unwrap_err();
        assert!(matches!(error, MetadataError::Malformed { .. }));
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let config = MetadataConfig {
            base_url: "http://127.0.0.1:1338/".to_string(),
            ..MetadataConfig::default()
        };
        let client = MetadataClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:1338");
    }

    #[test]
    fn test_error_display_names_the_path() {
        let error = MetadataError::malformed(INSTANCE_ID_PATH, "empty body");
        assert!(error.to_string().contains("/latest/meta-data/instance-id"));
    }
}
