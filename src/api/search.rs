use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::info;

use super::extract::SearchQuery;
use super::{ApiError, AppState};
use crate::constants::limits::SEARCH_LIMIT;
use crate::models::SearchResult;

pub async fn search_anime(
    State(state): State<Arc<AppState>>,
    SearchQuery(query): SearchQuery,
) -> Result<Json<SearchResult>, ApiError> {
    let result = state.catalog.search(&query, SEARCH_LIMIT).await?;

    info!(query = %query, matches = result.matches.len(), "Search finished");
    Ok(Json(result))
}
