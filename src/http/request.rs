//! Request identification.
//!
//! # Design Decisions
//! - Request ID (UUID v4) set by `SetRequestIdLayer` before anything else
//! - The same ID is echoed in the response and in every log line

use axum::http::{HeaderMap, HeaderName};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The request ID header, or `"unknown"` when absent.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
