use axum::extract::State;
use axum::http::header;
use axum::Json;
use models::view_model::SiteConfig;

use super::AppState;

/// Resolved site configuration. Always 200: resolution degrades to the
/// static fallback internally.
pub async fn get_config(State(state): State<AppState>) -> Json<SiteConfig> {
    let config = state.resolver.resolve().await;
    Json((*config).clone())
}

/// schema.org JSON-LD derived from the current view model.
pub async fn structured_data(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.resolver.resolve().await;
    Json(service::seo::structured_data(&config))
}

pub async fn sitemap(State(state): State<AppState>) -> ([(header::HeaderName, &'static str); 1], String) {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        service::seo::sitemap_xml(&state.base_url),
    )
}

/// Social-preview card rendered from branding copy.
pub async fn og_image(State(state): State<AppState>) -> ([(header::HeaderName, &'static str); 1], String) {
    let config = state.resolver.resolve().await;
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        service::seo::og_image_svg(&config),
    )
}
