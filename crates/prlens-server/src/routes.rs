//! HTTP handlers for the prlens service.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use prlens_core::AnalysisRequest;

use crate::http;
use crate::AppState;

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// `POST /pr-summary` — analyze a pull request.
///
/// Returns `201 Created` with `{summary, risk_score}` on success. Body
/// binding failures (missing fields, wrong types, unknown fields) answer 400
/// before the pipeline runs.
pub async fn create_pr_summary(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return http::bad_request(&rejection.body_text()),
    };

    match state.pipeline.analyze(&request).await {
        Ok(result) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(err) => http::error_response(&err),
    }
}
