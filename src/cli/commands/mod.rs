mod episode;
mod search;

pub use episode::{cmd_player_data, cmd_qualities};
pub use search::cmd_search_anime;
