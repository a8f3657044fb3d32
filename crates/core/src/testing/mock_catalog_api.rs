//! Mock catalog API for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::fixtures::CatalogFixture;
use crate::api::{ApiError, CatalogApi, FilterOption, Game, GamesQuery, PageResult};
use crate::config::DEFAULT_MAX_LIMIT;

/// A recorded API call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedApiCall {
    ListCategories,
    ListPublishers,
    ListGames(GamesQuery),
    GetGame { id: u32 },
}

impl RecordedApiCall {
    pub fn is_categories(&self) -> bool {
        matches!(self, RecordedApiCall::ListCategories)
    }

    pub fn is_publishers(&self) -> bool {
        matches!(self, RecordedApiCall::ListPublishers)
    }

    pub fn is_games(&self) -> bool {
        matches!(self, RecordedApiCall::ListGames(_))
    }
}

/// Mock implementation of the CatalogApi trait.
///
/// Provides controllable behavior for testing:
/// - Filters and paginates seeded games the way the real endpoint does
/// - Tracks calls for assertions
/// - Simulates one-shot or persistent failures
#[derive(Debug, Default)]
pub struct MockCatalogApi {
    games: RwLock<Vec<Game>>,
    categories: RwLock<Vec<FilterOption>>,
    publishers: RwLock<Vec<FilterOption>>,
    calls: RwLock<Vec<RecordedApiCall>>,
    /// If set, the next call will fail with this error.
    next_error: RwLock<Option<ApiError>>,
    fail_categories: RwLock<bool>,
    fail_publishers: RwLock<bool>,
}

impl MockCatalogApi {
    /// Create a new empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Data Configuration
    // =========================================================================

    /// Replace all games and options with a fixture.
    pub async fn seed(&self, fixture: CatalogFixture) {
        *self.games.write().await = fixture.games;
        *self.categories.write().await = fixture.categories;
        *self.publishers.write().await = fixture.publishers;
    }

    pub async fn set_games(&self, games: Vec<Game>) {
        *self.games.write().await = games;
    }

    /// Add a game at the front, shifting every later page by one.
    pub async fn insert_game_first(&self, game: Game) {
        self.games.write().await.insert(0, game);
    }

    pub async fn set_categories(&self, categories: Vec<FilterOption>) {
        *self.categories.write().await = categories;
    }

    pub async fn set_publishers(&self, publishers: Vec<FilterOption>) {
        *self.publishers.write().await = publishers;
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: ApiError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    /// Make every categories call fail until turned off.
    pub async fn fail_categories(&self, fail: bool) {
        *self.fail_categories.write().await = fail;
    }

    /// Make every publishers call fail until turned off.
    pub async fn fail_publishers(&self, fail: bool) {
        *self.fail_publishers.write().await = fail;
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedApiCall> {
        self.calls.read().await.clone()
    }

    /// Count recorded calls matching a predicate.
    pub async fn count_calls<F>(&self, predicate: F) -> usize
    where
        F: Fn(&RecordedApiCall) -> bool,
    {
        self.calls.read().await.iter().filter(|c| predicate(c)).count()
    }

    /// Queries of every games call, in order.
    pub async fn games_queries(&self) -> Vec<GamesQuery> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                RecordedApiCall::ListGames(query) => Some(*query),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    async fn record(&self, call: RecordedApiCall) -> Result<(), ApiError> {
        self.calls.write().await.push(call);
        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
    async fn list_categories(&self) -> Result<Vec<FilterOption>, ApiError> {
        self.record(RecordedApiCall::ListCategories).await?;
        if *self.fail_categories.read().await {
            return Err(ApiError::Unavailable("categories offline".to_string()));
        }
        Ok(self.categories.read().await.clone())
    }

    async fn list_publishers(&self) -> Result<Vec<FilterOption>, ApiError> {
        self.record(RecordedApiCall::ListPublishers).await?;
        if *self.fail_publishers.read().await {
            return Err(ApiError::Unavailable("publishers offline".to_string()));
        }
        Ok(self.publishers.read().await.clone())
    }

    async fn list_games(&self, query: &GamesQuery) -> Result<PageResult, ApiError> {
        self.record(RecordedApiCall::ListGames(*query)).await?;

        let games = self.games.read().await;
        let matching: Vec<&Game> = games
            .iter()
            .filter(|g| {
                query
                    .category_id
                    .map_or(true, |id| g.category.as_ref().map(|c| c.id) == Some(id))
            })
            .filter(|g| {
                query
                    .publisher_id
                    .map_or(true, |id| g.publisher.as_ref().map(|p| p.id) == Some(id))
            })
            .collect();

        let total = matching.len();
        let limit = query.limit.min(DEFAULT_MAX_LIMIT) as usize;
        let page: Vec<Game> = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(limit)
            .cloned()
            .collect();
        let has_more = query.offset as usize + page.len() < total;

        Ok(PageResult {
            games: page,
            total: total as u64,
            has_more,
        })
    }

    async fn get_game(&self, id: u32) -> Result<Game, ApiError> {
        self.record(RecordedApiCall::GetGame { id }).await?;
        self.games
            .read()
            .await
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Game ID {}", id)))
    }
}
