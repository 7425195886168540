use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod polls;
pub mod voters;
pub mod votes;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Attach the health route and the shared CORS/trace layers to a service's
/// API router.
pub fn build_router(api: Router, cors: CorsLayer) -> Router {
    api.route("/health", get(health)).layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
