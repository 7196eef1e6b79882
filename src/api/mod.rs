use axum::{Router, http::HeaderValue, middleware, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::CatalogClient;
use crate::clients::yummy::YummyClient;
use crate::config::Config;
use crate::services::{EpisodeResolver, PlayerDataAggregator};

mod anime;
mod assets;
mod error;
mod extract;
pub mod observability;
mod search;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

/// Shared, read-only state handed to every handler.
///
/// Built once at startup; requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub catalog: Arc<dyn CatalogClient>,

    pub resolver: Arc<EpisodeResolver>,

    pub player_data: Arc<PlayerDataAggregator>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

pub fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let catalog: Arc<dyn CatalogClient> = Arc::new(YummyClient::new(&config.catalog)?);
    Ok(create_app_state_with_catalog(
        config,
        catalog,
        prometheus_handle,
    ))
}

/// Wires state around an arbitrary catalog implementation.
#[must_use]
pub fn create_app_state_with_catalog(
    config: Config,
    catalog: Arc<dyn CatalogClient>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let resolver = Arc::new(EpisodeResolver::new(catalog.clone()));
    let player_data = Arc::new(PlayerDataAggregator::new(resolver.clone()));

    Arc::new(AppState {
        config: Arc::new(config),
        catalog,
        resolver,
        player_data,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = if origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };
    layer.allow_methods(Any).allow_headers(Any)
}

pub fn router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route(
            "/anime/{slug}/video/{episode_index}/qualities",
            get(anime::get_qualities),
        )
        .route(
            "/anime/{slug}/player-data/{episode_index}",
            get(anime::get_player_data),
        )
        .route("/search", get(search::search_anime))
        .route("/health", get(system::health))
        .fallback(assets::not_found);

    Router::new()
        .nest("/api", api_router)
        .route("/", get(assets::serve_player))
        .route("/player.html", get(assets::serve_player))
        .route("/metrics", get(observability::get_metrics))
        .fallback(assets::not_found)
        .with_state(state.clone())
        .layer(cors_layer(&state.config.server.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
