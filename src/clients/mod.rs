//! Upstream catalog access.
//!
//! [`CatalogClient`] is the seam between the resolver and whichever provider
//! serves anime metadata and player links. [`yummy::YummyClient`] is the
//! production implementation; tests substitute their own.

pub mod kodik;
pub mod yummy;

use thiserror::Error;

use crate::domain::Slug;
use crate::models::{AnimeRecord, EpisodeRef, SearchResult};
use crate::quality::TierMap;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Anime '{0}' not found")]
    NotFound(String),

    #[error("Catalog API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode catalog response: {0}")]
    Decode(String),

    #[error("Unsupported player: {0}")]
    UnsupportedPlayer(String),

    #[error("Player page error: {0}")]
    Player(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Remote anime catalog.
///
/// Implementations own transport concerns (auth, timeouts, retries). Callers
/// propagate whatever error comes back without retrying.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetches an anime with its video list included.
    ///
    /// A record whose provider omits the video list comes back with an empty
    /// `episodes` vector.
    async fn get_anime_with_videos(&self, slug: &Slug) -> Result<AnimeRecord, CatalogError>;

    /// Resolves one episode's player into whatever tiers it offers.
    ///
    /// Takes the owning record because some players need it (for instance
    /// as the page `Referer`).
    async fn get_qualities(
        &self,
        episode: &EpisodeRef,
        anime: &AnimeRecord,
    ) -> Result<TierMap, CatalogError>;

    async fn search(&self, query: &str, limit: usize) -> Result<SearchResult, CatalogError>;
}
