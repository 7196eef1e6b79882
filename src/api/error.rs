use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::clients::CatalogError;
use crate::services::ResolveError;

/// Failure kinds the dispatcher knows how to render.
///
/// Handlers pick the variant; status codes are decided here and nowhere else.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed path parameter or missing query parameter.
    InvalidRequest(String),

    /// Episode lookup failed, whether the index was bad or the catalog was.
    NotFound(String),

    AssetNotFound(String),

    /// Catalog failure outside an episode lookup.
    Upstream(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(msg)
            | Self::NotFound(msg)
            | Self::AssetNotFound(msg)
            | Self::Upstream(msg) => f.write_str(msg),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) | Self::AssetNotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Upstream(msg) => {
                tracing::warn!("Catalog error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody::new(error_message))).into_response()
    }
}

impl From<ResolveError> for ApiError {
    /// Per-episode lookups report every failure as not found.
    fn from(err: ResolveError) -> Self {
        Self::NotFound(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl ApiError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    #[must_use]
    pub fn route_not_found() -> Self {
        Self::NotFound("Not Found".to_string())
    }

    #[must_use]
    pub fn player_not_found() -> Self {
        Self::AssetNotFound("Player file not found".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EpisodeIndex;

    #[test]
    fn resolve_errors_map_to_not_found() {
        let err: ApiError = ResolveError::EpisodeNotFound {
            index: EpisodeIndex::new(99),
            available: 3,
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err: ApiError = ResolveError::Upstream(CatalogError::Network("timeout".into())).into();
        assert_eq!(err.to_string(), "Network error: timeout");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn catalog_errors_map_to_server_error() {
        let err: ApiError = CatalogError::Api {
            status: 503,
            message: "maintenance".into(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_request_is_bad_request() {
        let err = ApiError::invalid("Query parameter \"q\" is required");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
