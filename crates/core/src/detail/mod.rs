//! Single-game detail lookup.

use tracing::{debug, warn};

use crate::api::{CatalogApi, Game};
use crate::error::CatalogError;

/// What the detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Found(Game),
    /// Rendered as a page-level "not found", not as a failure.
    NotFound(u32),
    Failed(String),
}

impl DetailState {
    pub fn game(&self) -> Option<&Game> {
        match self {
            DetailState::Found(game) => Some(game),
            _ => None,
        }
    }
}

/// Extract the id from a `/game/<id>` path.
pub fn parse_detail_path(path: &str) -> Option<u32> {
    let rest = path.trim_end_matches('/').strip_prefix("/game/")?;
    rest.parse().ok()
}

/// Fetch one game, mapping a missing id to [`CatalogError::NotFound`].
pub async fn fetch_game(api: &dyn CatalogApi, id: u32) -> Result<Game, CatalogError> {
    debug!("Loading game detail: id={}", id);
    api.get_game(id).await.map_err(|e| {
        if e.is_not_found() {
            CatalogError::NotFound(id)
        } else {
            CatalogError::FetchFailed(e)
        }
    })
}

/// Fetch one game into a renderable state.
pub async fn load_detail(api: &dyn CatalogApi, id: u32) -> DetailState {
    match fetch_game(api, id).await {
        Ok(game) => DetailState::Found(game),
        Err(CatalogError::NotFound(id)) => DetailState::NotFound(id),
        Err(e) => {
            warn!(id, error = %e, "Game detail failed");
            DetailState::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::testing::{fixtures, MockCatalogApi};

    #[test]
    fn test_parse_detail_path() {
        assert_eq!(parse_detail_path("/game/17"), Some(17));
        assert_eq!(parse_detail_path("/game/17/"), Some(17));
        assert_eq!(parse_detail_path("/game/abc"), None);
        assert_eq!(parse_detail_path("/games/17"), None);
        assert_eq!(parse_detail_path("/game/"), None);
    }

    #[tokio::test]
    async fn test_load_detail_found() {
        let mock = MockCatalogApi::new();
        mock.seed(fixtures::catalog(5, 2, 2)).await;

        let state = load_detail(&mock, 3).await;
        assert_eq!(state.game().map(|g| g.id), Some(3));
    }

    #[tokio::test]
    async fn test_load_detail_missing_is_not_found() {
        let mock = MockCatalogApi::new();
        mock.seed(fixtures::catalog(5, 2, 2)).await;

        assert_eq!(load_detail(&mock, 999).await, DetailState::NotFound(999));
    }

    #[tokio::test]
    async fn test_load_detail_server_error_is_failure() {
        let mock = MockCatalogApi::new();
        mock.set_next_error(ApiError::ApiError {
            status: 500,
            message: "boom".to_string(),
        })
        .await;

        let state = load_detail(&mock, 1).await;
        assert!(matches!(state, DetailState::Failed(msg) if msg.contains("500")));
    }
}
