//! # Request ID Middleware
//!
//! Tags every request with a fresh correlation ID so a single page load can
//! be traced through the logs.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Response header carrying the correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation ID wrapper stored in request extensions
#[derive(Debug, Clone)]
pub struct RequestId(String);

impl RequestId {
    /// Get the request ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Generate a request ID and attach it to the request and response.
///
/// Handlers can read it back from request extensions; clients see it in the
/// `x-request-id` response header.
pub async fn add_request_id(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    // UUIDs are always valid header values; skip the header on the
    // impossible parse failure rather than panic mid-request.
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_as_str() {
        let id = RequestId("550e8400-e29b-41d4-a716-446655440000".to_string());
        assert_eq!(id.as_str(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_generated_ids_are_valid_header_values() {
        let id = Uuid::new_v4().to_string();
        assert!(HeaderValue::from_str(&id).is_ok());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(Uuid::new_v4().to_string(), Uuid::new_v4().to_string());
    }
}
