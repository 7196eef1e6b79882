//! Shared fixtures: an in-memory catalog and an app wired around it.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;
use yummy_player::clients::{CatalogClient, CatalogError};
use yummy_player::config::Config;
use yummy_player::domain::Slug;
use yummy_player::models::{AnimeRecord, EpisodeRef, SearchResult, Timing};
use yummy_player::quality::{QualityTier, QualityVariant, TierMap};

pub struct StubCatalog {
    pub anime: HashMap<String, AnimeRecord>,
    pub tiers: Vec<QualityTier>,
    pub fail_search: bool,
    pub anime_calls: AtomicUsize,
    pub quality_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self {
            anime: HashMap::new(),
            tiers: QualityTier::ALL.to_vec(),
            fail_search: false,
            anime_calls: AtomicUsize::new(0),
            quality_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_anime(mut self, slug: &str, episodes: usize) -> Self {
        let record = AnimeRecord {
            slug: Slug::new(slug),
            title: format!("{slug} title"),
            canonical_url: format!("https://yummyani.me/catalog/item/{slug}"),
            episodes: (0..episodes)
                .map(|i| {
                    EpisodeRef::new(i64::try_from(i).unwrap() + 1, format!("{}", 1000 + i))
                        .with_player("Kodik", format!("//kodik.info/seria/{i}/hash/720p"))
                })
                .collect(),
        };
        self.anime.insert(slug.to_string(), record);
        self
    }

    pub fn with_tiers(mut self, tiers: &[QualityTier]) -> Self {
        self.tiers = tiers.to_vec();
        self
    }

    pub fn quality_calls(&self) -> usize {
        self.quality_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CatalogClient for StubCatalog {
    async fn get_anime_with_videos(&self, slug: &Slug) -> Result<AnimeRecord, CatalogError> {
        self.anime_calls.fetch_add(1, Ordering::SeqCst);
        self.anime
            .get(slug.as_str())
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
    }

    async fn get_qualities(
        &self,
        episode: &EpisodeRef,
        _anime: &AnimeRecord,
    ) -> Result<TierMap, CatalogError> {
        self.quality_calls.fetch_add(1, Ordering::SeqCst);
        let referer = episode
            .player_url
            .clone()
            .map(|u| format!("https:{u}"))
            .unwrap_or_default();
        Ok(self
            .tiers
            .iter()
            .map(|tier| {
                (
                    *tier,
                    QualityVariant::new(
                        format!(
                            "https://cdn.test/{}/{}.mp4:hls:manifest.m3u8",
                            episode.video_handle_id,
                            tier.height()
                        ),
                        referer.clone(),
                    ),
                )
            })
            .collect())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<SearchResult, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(CatalogError::Api {
                status: 503,
                message: "search is down".to_string(),
            });
        }
        Ok(SearchResult {
            matches: vec![serde_json::json!({
                "title": format!("Result for {query}"),
                "limit": limit,
            })],
            timings: vec![Timing {
                operation_name: "search".to_string(),
                duration_ms: 4.0,
            }],
        })
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.observability.metrics_enabled = false;
    config.server.player_path = std::env::temp_dir()
        .join(format!("yummy-player-missing-{}.html", uuid::Uuid::new_v4()))
        .display()
        .to_string();
    config
}

pub fn spawn_app_with(config: Config, catalog: Arc<StubCatalog>) -> Router {
    let state = yummy_player::api::create_app_state_with_catalog(config, catalog, None);
    yummy_player::api::router(state)
}

pub fn spawn_app(catalog: Arc<StubCatalog>) -> Router {
    spawn_app_with(test_config(), catalog)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("Origin", "http://player.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
