//! Request extractors whose rejections render as [`ApiError`] JSON.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;

use super::ApiError;
use super::validation::{parse_episode_index, validate_search_query, validate_slug};
use crate::domain::{EpisodeIndex, Slug};

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid(format!("Invalid path: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid(format!("Invalid query: {}", rejection.body_text()))
    }
}

/// `{slug}` and `{episode_index}` from an episode route, validated.
#[derive(Debug, Clone)]
pub struct EpisodePath {
    pub slug: Slug,
    pub index: EpisodeIndex,
}

impl<S> FromRequestParts<S> for EpisodePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((slug, episode_index)) =
            Path::<(String, String)>::from_request_parts(parts, state).await?;

        Ok(Self {
            slug: validate_slug(&slug)?,
            index: parse_episode_index(&episode_index)?,
        })
    }
}

/// The `q` parameter of a search. Repeated keys resolve to the first
/// non-empty value.
#[derive(Debug, Clone)]
pub struct SearchQuery(pub String);

impl<S> FromRequestParts<S> for SearchQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)?;

        let first = pairs
            .iter()
            .find(|(key, value)| key == "q" && !value.is_empty())
            .map(|(_, value)| value.as_str());

        Ok(Self(validate_search_query(first)?.to_string()))
    }
}
