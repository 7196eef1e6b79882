use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::kodik::KodikResolver;
use super::{CatalogClient, CatalogError};
use crate::config::CatalogConfig;
use crate::domain::Slug;
use crate::models::{AnimeRecord, EpisodeRef, SearchResult, Timing};
use crate::quality::TierMap;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
    #[serde(default)]
    timings: Vec<WireTiming>,
}

#[derive(Debug, Deserialize)]
struct WireTiming {
    name: String,
    #[serde(alias = "time", alias = "duration", default)]
    duration_ms: f64,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct WireAnime {
    #[serde(default)]
    title: String,
    #[serde(default)]
    anime_url: Option<String>,
    #[serde(default)]
    videos: Option<Vec<WireVideo>>,
}

#[derive(Debug, Deserialize)]
struct WireVideo {
    video_id: serde_json::Value,
    #[serde(default)]
    number: Option<serde_json::Value>,
    #[serde(default)]
    iframe_url: Option<String>,
    #[serde(default)]
    data: Option<WireVideoData>,
}

#[derive(Debug, Default, Deserialize)]
struct WireVideoData {
    #[serde(default)]
    player: Option<String>,
    #[serde(default)]
    dubbing: Option<String>,
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Episode numbers arrive as `1`, `"1"` or `"12.5"`; anything unusable falls
/// back to the 1-based list position.
#[allow(clippy::cast_possible_truncation)]
fn sequence_number(number: Option<&serde_json::Value>, position: usize) -> i64 {
    let parsed = match number {
        Some(serde_json::Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(serde_json::Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    };
    parsed.unwrap_or_else(|| i64::try_from(position + 1).unwrap_or(i64::MAX))
}

impl WireAnime {
    fn into_record(self, slug: &Slug, site_url: &str) -> AnimeRecord {
        let anime_url = self
            .anime_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| slug.to_string());
        let canonical_url = if anime_url.starts_with("http") {
            anime_url
        } else {
            format!(
                "{}/catalog/item/{}",
                site_url.trim_end_matches('/'),
                anime_url.trim_start_matches('/')
            )
        };

        let episodes = self
            .videos
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(position, video)| {
                let data = video.data.unwrap_or_default();
                EpisodeRef {
                    sequence_number: sequence_number(video.number.as_ref(), position),
                    video_handle_id: value_to_string(&video.video_id),
                    player_url: video.iframe_url,
                    player: data.player,
                    dubbing: data.dubbing,
                }
            })
            .collect();

        AnimeRecord {
            slug: slug.clone(),
            title: self.title,
            canonical_url,
            episodes,
        }
    }
}

fn build_http_client(config: &CatalogConfig) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build catalog HTTP client: {e}"))
}

/// Client for the YummyAnime public API.
///
/// Holds only its credential and a pooled HTTP client, so one instance is
/// shared by every request.
#[derive(Clone)]
pub struct YummyClient {
    client: Client,
    base_url: Url,
    site_url: String,
    application_token: String,
    lang: String,
    kodik: KodikResolver,
}

impl YummyClient {
    pub fn new(config: &CatalogConfig) -> anyhow::Result<Self> {
        let client = build_http_client(config)?;
        Self::with_shared_client(client, config)
    }

    pub fn with_shared_client(client: Client, config: &CatalogConfig) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid catalog base URL {}: {e}", config.base_url))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            kodik: KodikResolver::with_shared_client(client.clone()),
            client,
            base_url,
            site_url: config.site_url.clone(),
            application_token: config.application_token.clone(),
            lang: config.lang.clone(),
        })
    }

    /// Appends `segments` to the base URL, percent-encoding each one, so a
    /// segment can never add path levels, a query or a fragment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::Decode(format!("Base URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn anime_url(&self, slug: &Slug) -> Result<Url, CatalogError> {
        // Dot segments are dropped by the URL builder and would name a
        // different resource.
        if matches!(slug.as_str(), "." | "..") {
            return Err(CatalogError::NotFound(slug.to_string()));
        }

        let mut url = self.endpoint(&["anime", slug.as_str()])?;
        url.query_pairs_mut().append_pair("need_videos", "true");
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        not_found: &str,
    ) -> Result<Envelope<T>, CatalogError> {
        debug!(url = %url, "Catalog request");
        metrics::counter!("catalog_requests_total").increment(1);

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header("Lang", &self.lang);
        if !self.application_token.is_empty() {
            request = request.header("X-Application", &self.application_token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(not_found.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<WireError>(&body)
                .map(|e| value_to_string(&e.error))
                .unwrap_or(body);
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CatalogClient for YummyClient {
    async fn get_anime_with_videos(&self, slug: &Slug) -> Result<AnimeRecord, CatalogError> {
        let url = self.anime_url(slug)?;

        let envelope: Envelope<WireAnime> = self.get_json(url, slug.as_str()).await?;
        Ok(envelope.response.into_record(slug, &self.site_url))
    }

    async fn get_qualities(
        &self,
        episode: &EpisodeRef,
        anime: &AnimeRecord,
    ) -> Result<TierMap, CatalogError> {
        let player_url = episode.player_url.as_deref().ok_or_else(|| {
            CatalogError::Player(format!(
                "Video {} has no player URL",
                episode.video_handle_id
            ))
        })?;

        let is_kodik = episode
            .player
            .as_deref()
            .is_some_and(|p| p.to_lowercase().contains("kodik"))
            || player_url.contains("kodik");

        if !is_kodik {
            return Err(CatalogError::UnsupportedPlayer(
                episode
                    .player
                    .clone()
                    .unwrap_or_else(|| player_url.to_string()),
            ));
        }

        self.kodik.resolve(player_url, &anime.canonical_url).await
    }

    async fn search(&self, query: &str, limit: usize) -> Result<SearchResult, CatalogError> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", "0");

        let envelope: Envelope<serde_json::Value> = self.get_json(url, query).await?;

        let matches = match envelope.response {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Null => Vec::new(),
            other => vec![other],
        };

        Ok(SearchResult {
            matches,
            timings: envelope
                .timings
                .into_iter()
                .map(|t| Timing {
                    operation_name: t.name,
                    duration_ms: t.duration_ms,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANIME_JSON: &str = r#"{
        "response": {
            "anime_id": 3125,
            "title": "Sousou no Frieren",
            "anime_url": "sousou-no-frieren",
            "videos": [
                {"video_id": 101, "number": "1", "iframe_url": "//kodik.info/seria/1/a/720p",
                 "data": {"player": "Плеер Kodik", "dubbing": "AniLibria"}},
                {"video_id": 102, "number": 2, "iframe_url": "//kodik.info/seria/2/b/720p",
                 "data": {"player": "Плеер Kodik", "dubbing": "AniLibria"}},
                {"video_id": "103", "number": "special", "iframe_url": null}
            ]
        }
    }"#;

    #[test]
    fn anime_envelope_converts_to_record() {
        let envelope: Envelope<WireAnime> = serde_json::from_str(ANIME_JSON).unwrap();
        let record = envelope
            .response
            .into_record(&Slug::new("sousou-no-frieren"), "https://yummyani.me/");

        assert_eq!(record.title, "Sousou no Frieren");
        assert_eq!(
            record.canonical_url,
            "https://yummyani.me/catalog/item/sousou-no-frieren"
        );
        assert_eq!(record.episode_count(), 3);
        assert_eq!(record.episodes[0].sequence_number, 1);
        assert_eq!(record.episodes[0].video_handle_id, "101");
        assert_eq!(record.episodes[0].dubbing.as_deref(), Some("AniLibria"));
        assert_eq!(record.episodes[1].sequence_number, 2);
        assert_eq!(record.episodes[2].sequence_number, 3);
        assert_eq!(record.episodes[2].video_handle_id, "103");
        assert_eq!(record.episodes[2].player_url, None);
    }

    #[test]
    fn missing_videos_become_empty_list() {
        let json = r#"{"response": {"title": "No Videos", "anime_url": "no-videos"}}"#;
        let envelope: Envelope<WireAnime> = serde_json::from_str(json).unwrap();
        let record = envelope
            .response
            .into_record(&Slug::new("no-videos"), "https://yummyani.me");
        assert!(record.episodes.is_empty());

        let json = r#"{"response": {"title": "Null Videos", "videos": null}}"#;
        let envelope: Envelope<WireAnime> = serde_json::from_str(json).unwrap();
        let record = envelope
            .response
            .into_record(&Slug::new("null-videos"), "https://yummyani.me");
        assert!(record.episodes.is_empty());
        assert_eq!(
            record.canonical_url,
            "https://yummyani.me/catalog/item/null-videos"
        );
    }

    #[test]
    fn fractional_episode_numbers_truncate() {
        let value = serde_json::json!("12.5");
        assert_eq!(sequence_number(Some(&value), 0), 12);
        assert_eq!(sequence_number(None, 4), 5);
    }

    #[test]
    fn search_timings_accept_time_alias() {
        let json = r#"{"response": [{"title": "A"}], "timings": [{"name": "search", "time": 12.5}]}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.timings[0].name, "search");
        assert!((envelope.timings[0].duration_ms - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = CatalogConfig {
            base_url: "https://api.yani.tv/v1".to_string(),
            ..CatalogConfig::default()
        };
        let client = YummyClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(&["anime", "x"]).unwrap().as_str(),
            "https://api.yani.tv/v1/anime/x"
        );
    }

    #[test]
    fn slug_stays_a_single_path_segment() {
        let client = YummyClient::new(&CatalogConfig::default()).unwrap();
        let url = |slug: &str| client.anime_url(&Slug::new(slug)).unwrap().to_string();

        assert_eq!(
            url("sousou-no-frieren"),
            "https://api.yani.tv/anime/sousou-no-frieren?need_videos=true"
        );
        assert_eq!(
            url("../search"),
            "https://api.yani.tv/anime/..%2Fsearch?need_videos=true"
        );
        assert_eq!(
            url("foo?need_videos=false"),
            "https://api.yani.tv/anime/foo%3Fneed_videos=false?need_videos=true"
        );
        assert_eq!(url("foo#x"), "https://api.yani.tv/anime/foo%23x?need_videos=true");
        assert_eq!(url("50%"), "https://api.yani.tv/anime/50%25?need_videos=true");

        assert!(matches!(
            client.anime_url(&Slug::new("..")),
            Err(CatalogError::NotFound(_))
        ));
    }
}
