pub mod episode_resolver;
pub use episode_resolver::{EpisodeResolver, ResolveError, ResolvedEpisode, select_episode};

pub mod player_data;
pub use player_data::PlayerDataAggregator;
