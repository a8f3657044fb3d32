//! Common test utilities for controller and HTTP client tests.
//!
//! Provides:
//! - Quiet, capture-friendly tracing setup
//! - A controller harness backed by [`MockCatalogApi`]
//! - An in-process stub of the catalog HTTP API

#![allow(dead_code)]

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing_subscriber::{fmt, EnvFilter};

use gamecatalog_core::testing::fixtures::CatalogFixture;
use gamecatalog_core::testing::MockCatalogApi;
use gamecatalog_core::{
    ApiError, CatalogApi, CatalogController, Completion, FilterCatalog, FilterOption, Game,
    GamesQuery, MemoryHistory, PageResult, PaginationConfig, PendingFetch,
};

/// Re-export fixtures for test convenience
pub use gamecatalog_core::testing::fixtures;

// =============================================================================
// Logging
// =============================================================================

static LOGGING: OnceCell<()> = OnceCell::new();

/// Initialize tracing for tests. Level from `TEST_LOG`, then `RUST_LOG`, else `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

// =============================================================================
// Controller Harness
// =============================================================================

/// 60 games over 5 categories and 9 publishers.
pub fn standard_catalog() -> CatalogFixture {
    fixtures::catalog(60, 5, 9)
}

/// A controller wired to a mock API, with an in-memory history.
///
/// # Example
///
/// ```rust,ignore
/// let mut h = Harness::new("category=3").await;
/// h.mount().await;
/// assert_eq!(h.controller.accumulator().len(), 12);
/// ```
pub struct Harness {
    /// Mock API - seed data, inject failures, inspect calls
    pub api: Arc<MockCatalogApi>,
    pub controller: CatalogController<MemoryHistory>,
}

impl Harness {
    /// Harness over [`standard_catalog`], opened at `query`.
    pub async fn new(query: &str) -> Self {
        Self::with_fixture(query, standard_catalog()).await
    }

    pub async fn with_fixture(query: &str, fixture: CatalogFixture) -> Self {
        init_logging();

        let api = Arc::new(MockCatalogApi::new());
        api.seed(fixture).await;

        let dyn_api: Arc<dyn CatalogApi> = Arc::clone(&api) as Arc<dyn CatalogApi>;
        let filters = Arc::new(FilterCatalog::new(Arc::clone(&dyn_api)));
        let controller = CatalogController::new(
            dyn_api,
            filters,
            PaginationConfig::default(),
            MemoryHistory::new(query),
        );

        Self { api, controller }
    }

    /// Mount and wait for the initial listing.
    pub async fn mount(&mut self) -> Completion {
        let pending = self.controller.mount().await;
        self.controller.dispatch(pending).await
    }

    pub async fn run(&mut self, pending: PendingFetch) -> Completion {
        self.controller.dispatch(pending).await
    }

    /// Query string the address bar currently shows.
    pub fn url(&self) -> String {
        use gamecatalog_core::History;
        self.controller.history().current_query()
    }

    pub fn game_ids(&self) -> Vec<u32> {
        self.controller.accumulator().games().iter().map(|g| g.id).collect()
    }
}

// =============================================================================
// Stub HTTP API
// =============================================================================

/// The catalog API served over HTTP from a [`MockCatalogApi`].
///
/// Bound to an ephemeral localhost port; shut down on drop.
pub struct StubServer {
    pub api: Arc<MockCatalogApi>,
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Serve `fixture` with the real endpoint layout.
    pub async fn start(fixture: CatalogFixture) -> Self {
        let api = Arc::new(MockCatalogApi::new());
        api.seed(fixture).await;

        let router = Router::new()
            .route("/api/categories", get(list_categories))
            .route("/api/publishers", get(list_publishers))
            .route("/api/games", get(list_games))
            .route("/api/games/{id}", get(get_game))
            .with_state(Arc::clone(&api));

        Self::serve(api, router).await
    }

    /// Serve an arbitrary router, e.g. one returning malformed bodies.
    pub async fn raw(router: Router) -> Self {
        Self::serve(Arc::new(MockCatalogApi::new()), router).await
    }

    async fn serve(api: Arc<MockCatalogApi>, router: Router) -> Self {
        init_logging();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("No local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self {
            api,
            base_url: format!("http://{}", addr),
            handle,
        }
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

type HandlerResult<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Debug, Deserialize)]
struct GamesParams {
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    offset: u32,
    category: Option<u32>,
    publisher: Option<u32>,
}

fn default_limit() -> u32 {
    12
}

fn to_status(err: ApiError) -> (StatusCode, String) {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, err.to_string())
}

async fn list_categories(State(api): State<Arc<MockCatalogApi>>) -> HandlerResult<Vec<FilterOption>> {
    api.list_categories().await.map(Json).map_err(to_status)
}

async fn list_publishers(State(api): State<Arc<MockCatalogApi>>) -> HandlerResult<Vec<FilterOption>> {
    api.list_publishers().await.map(Json).map_err(to_status)
}

async fn list_games(
    State(api): State<Arc<MockCatalogApi>>,
    Query(params): Query<GamesParams>,
) -> HandlerResult<PageResult> {
    let query = GamesQuery {
        limit: params.limit,
        offset: params.offset,
        category_id: params.category,
        publisher_id: params.publisher,
    };
    api.list_games(&query).await.map(Json).map_err(to_status)
}

async fn get_game(
    State(api): State<Arc<MockCatalogApi>>,
    Path(id): Path<u32>,
) -> HandlerResult<Game> {
    api.get_game(id).await.map(Json).map_err(to_status)
}
