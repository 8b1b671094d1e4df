use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use service::{reservation::ReservationService, resolver::ConfigResolver, upstream::UpstreamClient};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, AppState};

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build shared state from the application config. One upstream client is
/// shared by the resolver and the reservation service; `None` when the
/// process runs without provider id or endpoint.
pub fn build_state(cfg: &configs::AppConfig) -> anyhow::Result<AppState> {
    let upstream = match (&cfg.upstream.provider_id, &cfg.upstream.endpoint) {
        (Some(provider_id), Some(endpoint)) => Some(Arc::new(UpstreamClient::new(
            endpoint,
            provider_id,
            Duration::from_secs(cfg.upstream.request_timeout_secs),
        )?)),
        _ => {
            warn!("upstream provider id or endpoint missing; serving fallback config only");
            None
        }
    };

    let resolver = ConfigResolver::new(
        upstream.clone(),
        Duration::from_secs(cfg.upstream.cache_ttl_secs),
    );
    let reservations = ReservationService::new(upstream);

    Ok(AppState {
        resolver: Arc::new(resolver),
        reservations: Arc::new(reservations),
        base_url: cfg.site.base_url.clone(),
    })
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;
    let state = build_state(&cfg)?;

    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, configured = cfg.upstream.is_configured(), "starting site server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
