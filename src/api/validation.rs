use super::ApiError;
use crate::domain::{EpisodeIndex, Slug};

pub fn validate_slug(slug: &str) -> Result<Slug, ApiError> {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid("Invalid path: slug cannot be empty"));
    }
    Ok(Slug::new(trimmed))
}

/// Parses the raw path segment. Only syntax is checked here; range is the
/// resolver's concern, so `-1` and integers wider than `i64` parse.
pub fn parse_episode_index(raw: &str) -> Result<EpisodeIndex, ApiError> {
    raw.parse::<EpisodeIndex>().map_err(|e| {
        ApiError::invalid(format!(
            "Invalid path: episode index '{raw}' is not an integer ({e})"
        ))
    })
}

pub fn validate_search_query(query: Option<&str>) -> Result<&str, ApiError> {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => Ok(q),
        _ => Err(ApiError::invalid("Query parameter \"q\" is required")),
    }
}
