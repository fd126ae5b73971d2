//! Mapping from pipeline errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use prlens_core::PrlensError;

/// Generic message for failures the client cannot act on.
const GENERIC_FAILURE: &str = "Failed to generate PR summary";

/// Build an error response body in `{statusCode, message, error}` shape.
///
/// Client errors (400, 404) carry the specific message; everything else is
/// collapsed into a generic 500 so that upstream details and secrets never
/// reach the caller. The full error is logged here, at the point where it
/// leaves the system.
pub(crate) fn error_response(err: &PrlensError) -> Response {
    let (status, message) = match err {
        PrlensError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        PrlensError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string()),
    };

    tracing::error!(error = %err, status = status.as_u16(), "request failed");
    body_for(status, &message)
}

/// Build an error response with an explicit status and message, used for
/// request binding failures before the pipeline is reached.
pub(crate) fn bad_request(message: &str) -> Response {
    tracing::warn!(message, "rejected malformed request body");
    body_for(StatusCode::BAD_REQUEST, message)
}

fn body_for(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "statusCode": status.as_u16(),
        "message": message,
        "error": status.canonical_reason().unwrap_or("Unknown"),
    });
    (status, Json(body)).into_response()
}
