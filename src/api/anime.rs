use axum::{Json, extract::State};
use std::sync::Arc;

use super::extract::EpisodePath;
use super::{ApiError, AppState};
use crate::models::PlayerPayload;
use crate::quality::QualityLadder;

pub async fn get_qualities(
    State(state): State<Arc<AppState>>,
    EpisodePath { slug, index }: EpisodePath,
) -> Result<Json<QualityLadder>, ApiError> {
    let ladder = state.resolver.qualities(&slug, index).await?;
    Ok(Json(ladder))
}

pub async fn get_player_data(
    State(state): State<Arc<AppState>>,
    EpisodePath { slug, index }: EpisodePath,
) -> Result<Json<PlayerPayload>, ApiError> {
    let payload = state.player_data.aggregate(&slug, index).await?;
    Ok(Json(payload))
}
