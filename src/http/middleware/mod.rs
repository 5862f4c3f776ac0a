//! Request middleware.

pub mod webhook_auth;

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::observability::metrics;

pub use webhook_auth::{webhook_auth_middleware, CanonicalRoute};

/// Count every response by status and record its latency.
pub async fn request_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let response = next.run(request).await;
    metrics::record_request(response.status().as_u16(), start);
    response
}
