//! Canned JSON responses.
//!
//! Every non-success outcome uses the platform's `{"type":"FAILED"}` shape
//! so the caller can always parse the body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::resources::FindResponse;

pub fn failed(status: StatusCode, code: &'static str) -> Response {
    (status, Json(FindResponse::failed_with(code))).into_response()
}

pub fn unauthorized() -> Response {
    failed(StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
}

pub fn payload_too_large() -> Response {
    failed(StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE")
}

pub fn not_implemented() -> Response {
    failed(StatusCode::NOT_FOUND, "NOT_IMPLEMENTED")
}

pub fn invalid_request() -> Response {
    failed(StatusCode::BAD_REQUEST, "INVALID_REQUEST")
}
