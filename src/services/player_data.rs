use std::sync::Arc;

use super::episode_resolver::{EpisodeResolver, ResolveError};
use crate::domain::{EpisodeIndex, Slug};
use crate::models::PlayerPayload;

/// Composes a resolved episode with its descriptive fields for the player.
///
/// Makes no upstream calls of its own beyond the resolver's.
#[derive(Clone)]
pub struct PlayerDataAggregator {
    resolver: Arc<EpisodeResolver>,
}

impl PlayerDataAggregator {
    #[must_use]
    pub const fn new(resolver: Arc<EpisodeResolver>) -> Self {
        Self { resolver }
    }

    pub async fn aggregate(
        &self,
        slug: &Slug,
        index: EpisodeIndex,
    ) -> Result<PlayerPayload, ResolveError> {
        let resolved = self.resolver.resolve(slug, index).await?;
        Ok(resolved.into_player_payload())
    }
}
