//! Client side of the catalog HTTP API.
//!
//! The API itself is an external collaborator; this module only describes
//! its contract and provides a reqwest-backed client for it.

mod http;
mod types;

pub use http::HttpCatalogApi;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The API could not be reached at all.
    #[error("Catalog API unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Whether this error means the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Trait for catalog API clients.
///
/// Implemented by [`HttpCatalogApi`] and by the mock in `testing`, so the
/// controller never depends on a concrete transport.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /api/categories`
    async fn list_categories(&self) -> Result<Vec<FilterOption>, ApiError>;

    /// `GET /api/publishers`
    async fn list_publishers(&self) -> Result<Vec<FilterOption>, ApiError>;

    /// `GET /api/games` with pagination and optional filters.
    async fn list_games(&self, query: &GamesQuery) -> Result<PageResult, ApiError>;

    /// `GET /api/games/<id>`
    async fn get_game(&self, id: u32) -> Result<Game, ApiError>;
}
