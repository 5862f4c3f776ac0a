//! Route handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;

use crate::auth::canonical::FIND_RESOURCES;
use crate::http::middleware::CanonicalRoute;
use crate::http::request::request_id;
use crate::http::response::{invalid_request, not_implemented};
use crate::http::server::AppState;
use crate::resources::{find_resources, FindRequest};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn get_health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

/// Dispatch an authenticated webhook on its canonical route.
pub async fn webhook_handler(
    State(state): State<AppState>,
    Extension(route): Extension<CanonicalRoute>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = request_id(&headers);

    if route.as_str() != FIND_RESOURCES {
        tracing::info!(request_id = %request_id, route = %route.as_str(), "Route not served");
        return not_implemented();
    }

    let request = if body.is_empty() {
        FindRequest::default()
    } else {
        match serde_json::from_slice::<FindRequest>(&body) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Malformed find request");
                return invalid_request();
            }
        }
    };

    tracing::debug!(
        request_id = %request_id,
        continuation = ?request.continuation,
        "Listing resources"
    );

    Json(find_resources(state.source.as_ref(), request).await).into_response()
}
