pub mod anime;
pub mod player;
pub mod search;

pub use anime::{AnimeRecord, EpisodeRef};
pub use player::{AnimeInfo, EpisodeInfo, PlayerPayload};
pub use search::{SearchResult, Timing};
