use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::constants::assets::HTML_CONTENT_TYPE;

/// Serves the player shell verbatim, re-read on every request.
pub async fn serve_player(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let path = &state.config.server.player_path;

    match tokio::fs::read(path).await {
        Ok(content) => Ok((
            [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)],
            Body::from(content),
        )
            .into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path, "Player file missing");
            Err(ApiError::player_not_found())
        }
        Err(e) => Err(ApiError::internal(format!(
            "Failed to read player file {path}: {e}"
        ))),
    }
}

pub async fn not_found() -> ApiError {
    ApiError::route_not_found()
}
