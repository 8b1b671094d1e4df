use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use service::{reservation::ReservationService, resolver::ConfigResolver};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod reservations;
pub mod site;

/// Shared per-process state. The resolver owns the config cache; the view
/// model it yields is read-only for the lifetime of a request.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ConfigResolver>,
    pub reservations: Arc<ReservationService>,
    pub base_url: String,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: site config + SEO artifacts +
/// reservation endpoints.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/config", get(site::get_config))
        .route("/api/services", get(reservations::list_services))
        .route("/api/reservations", post(reservations::create_reservation))
        .route("/structured-data.json", get(site::structured_data))
        .route("/sitemap.xml", get(site::sitemap))
        .route("/og-image.svg", get(site::og_image))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
