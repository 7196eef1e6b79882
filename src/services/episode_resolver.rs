//! Episode resolution: catalog record → selected video → quality ladder.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clients::{CatalogClient, CatalogError};
use crate::domain::{EpisodeIndex, Slug};
use crate::models::{AnimeInfo, AnimeRecord, EpisodeInfo, EpisodeRef, PlayerPayload};
use crate::quality::QualityLadder;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The index names no episode. `available` is the episode count, so the
    /// valid range is `0..available`.
    #[error("Episode index {index} not found")]
    EpisodeNotFound {
        index: EpisodeIndex,
        available: usize,
    },

    #[error(transparent)]
    Upstream(#[from] CatalogError),
}

/// Outcome of a successful resolution, before it is shaped for a consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEpisode {
    pub index: EpisodeIndex,
    pub anime: AnimeRecord,
    pub episode: EpisodeRef,
    pub qualities: QualityLadder,
}

impl ResolvedEpisode {
    #[must_use]
    pub fn into_player_payload(self) -> PlayerPayload {
        PlayerPayload {
            anime: AnimeInfo {
                title: self.anime.title,
                canonical_url: self.anime.canonical_url,
                slug: self.anime.slug,
            },
            episode: EpisodeInfo {
                index: self.index,
                sequence_number: self.episode.sequence_number,
                video_handle_id: self.episode.video_handle_id,
            },
            qualities: self.qualities,
        }
    }
}

/// Picks the episode at `index`, or reports the valid range.
pub fn select_episode<'a>(
    anime: &'a AnimeRecord,
    index: &EpisodeIndex,
) -> Result<&'a EpisodeRef, ResolveError> {
    index
        .position_in(anime.episodes.len())
        .and_then(|pos| anime.episodes.get(pos))
        .ok_or_else(|| ResolveError::EpisodeNotFound {
            index: index.clone(),
            available: anime.episodes.len(),
        })
}

/// Stateless resolver over a shared catalog client.
///
/// Every call performs its own upstream round-trips; nothing is cached.
#[derive(Clone)]
pub struct EpisodeResolver {
    catalog: Arc<dyn CatalogClient>,
}

impl EpisodeResolver {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self { catalog }
    }

    pub async fn resolve(
        &self,
        slug: &Slug,
        index: EpisodeIndex,
    ) -> Result<ResolvedEpisode, ResolveError> {
        let anime = self.catalog.get_anime_with_videos(slug).await.map_err(|e| {
            warn!(slug = %slug, error = %e, "Catalog lookup failed");
            ResolveError::from(e)
        })?;

        let episode = match select_episode(&anime, &index) {
            Ok(episode) => episode.clone(),
            Err(err) => {
                info!(
                    slug = %slug,
                    index = %index,
                    available = anime.episode_count(),
                    "Episode index out of range"
                );
                return Err(err);
            }
        };

        debug!(
            slug = %slug,
            index = %index,
            video_id = %episode.video_handle_id,
            "Resolving qualities"
        );

        let tiers = self
            .catalog
            .get_qualities(&episode, &anime)
            .await
            .map_err(|e| {
                warn!(slug = %slug, video_id = %episode.video_handle_id, error = %e, "Quality lookup failed");
                ResolveError::from(e)
            })?;

        let qualities = QualityLadder::from_tiers(tiers);
        metrics::counter!("episodes_resolved_total").increment(1);

        info!(
            slug = %slug,
            index = %index,
            tiers = ?qualities.available(),
            "Resolved episode"
        );

        Ok(ResolvedEpisode {
            index,
            anime,
            episode,
            qualities,
        })
    }

    /// Quality ladder alone, for consumers that already know the episode.
    pub async fn qualities(
        &self,
        slug: &Slug,
        index: EpisodeIndex,
    ) -> Result<QualityLadder, ResolveError> {
        self.resolve(slug, index).await.map(|r| r.qualities)
    }
}
