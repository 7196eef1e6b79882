use serde::{Deserialize, Serialize};

use crate::domain::Slug;

/// Catalog view of one anime, built fresh from each upstream response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeRecord {
    pub slug: Slug,
    pub title: String,
    pub canonical_url: String,
    pub episodes: Vec<EpisodeRef>,
}

impl AnimeRecord {
    #[must_use]
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRef {
    pub sequence_number: i64,
    pub video_handle_id: String,
    /// Iframe URL of the player hosting this video.
    #[serde(default)]
    pub player_url: Option<String>,
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default)]
    pub dubbing: Option<String>,
}

impl EpisodeRef {
    pub fn new(sequence_number: i64, video_handle_id: impl Into<String>) -> Self {
        Self {
            sequence_number,
            video_handle_id: video_handle_id.into(),
            player_url: None,
            player: None,
            dubbing: None,
        }
    }

    #[must_use]
    pub fn with_player(mut self, player: impl Into<String>, player_url: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self.player_url = Some(player_url.into());
        self
    }
}
