use serde::{Deserialize, Serialize};

use crate::domain::{EpisodeIndex, Slug};
use crate::quality::QualityLadder;

/// Everything the frontend player needs to start an episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPayload {
    pub anime: AnimeInfo,
    pub episode: EpisodeInfo,
    pub qualities: QualityLadder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeInfo {
    pub title: String,
    pub canonical_url: String,
    pub slug: Slug,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    pub index: EpisodeIndex,
    pub sequence_number: i64,
    pub video_handle_id: String,
}
