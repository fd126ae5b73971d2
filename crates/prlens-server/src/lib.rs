//! HTTP surface for the prlens service.
//!
//! Exposes `POST /pr-summary` and a `GET /health` liveness probe, binds
//! request bodies to [`prlens_core::AnalysisRequest`], and maps
//! [`prlens_core::PrlensError`] variants to HTTP responses.

mod http;
mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use prlens_summary::AnalysisPipeline;
use tower_http::cors::CorsLayer;

/// Shared state handed to every handler.
pub struct AppState {
    /// The analysis pipeline; stateless across requests.
    pub pipeline: AnalysisPipeline,
}

/// Build the application router.
///
/// CORS is permissive; the service is meant to sit behind whatever edge the
/// deployment provides.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/pr-summary", post(routes::create_pr_summary))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
