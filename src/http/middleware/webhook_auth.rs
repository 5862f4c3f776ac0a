//! Webhook authentication middleware.
//! Rejects any request that is not signed by the calling platform.

use std::error::Error as StdError;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use http_body_util::{BodyExt, LengthLimitError, Limited};

use crate::auth::{HeaderLookup, InboundRequest};
use crate::http::request::request_id;
use crate::http::response::{invalid_request, payload_too_large, unauthorized};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Canonical route of an authenticated request, attached as an extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalRoute(pub String);

impl CanonicalRoute {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub async fn webhook_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let request_id = request_id(&parts.headers).to_string();

    // The signature covers the body exactly as sent, so buffer it unparsed.
    let raw_body = match Limited::new(body, state.max_body_size).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if exceeds_limit(e.as_ref()) => {
            tracing::warn!(
                request_id = %request_id,
                limit = state.max_body_size,
                "Request body over limit"
            );
            return payload_too_large();
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            return invalid_request();
        }
    };

    let headers = HeaderLookup::from_header_map(&parts.headers);
    let decision = state.authenticator.authenticate(&InboundRequest {
        headers: &headers,
        raw_body: &raw_body,
        path: parts.uri.path(),
    });
    metrics::record_auth_decision(decision.reason);

    let (true, Some(canonical_path)) = (decision.accepted, decision.canonical_path) else {
        tracing::warn!(
            request_id = %request_id,
            path = %parts.uri.path(),
            reason = %decision.reason,
            "Webhook authentication failed"
        );
        return unauthorized();
    };

    tracing::debug!(
        request_id = %request_id,
        route = %canonical_path,
        "Webhook authenticated"
    );

    parts.extensions.insert(CanonicalRoute(canonical_path));
    next.run(Request::from_parts(parts, Body::from(raw_body))).await
}

/// The size limit may be hit here or by an outer limit layer whose error
/// arrives wrapped in the body's own error type.
fn exceeds_limit(err: &(dyn StdError + 'static)) -> bool {
    std::iter::successors(Some(err), |e: &&(dyn StdError + 'static)| (*e).source()).any(|e| e.is::<LengthLimitError>())
}
