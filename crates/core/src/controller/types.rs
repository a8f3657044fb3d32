use std::time::Instant;

use tracing::debug;

use crate::api::{ApiError, CatalogApi, Game, GamesQuery, PageResult};
use crate::metrics::GAMES_FETCH_DURATION;
use crate::view_state::{Fingerprint, ViewState};

/// Fencing token; strictly increasing per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub(crate) u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Listing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Nothing requested yet.
    Idle,
    /// Waiting for the response tagged with this token.
    Loading(RequestToken),
    /// Latest response committed.
    Loaded,
    /// Latest request failed; previously loaded games are kept.
    Error,
}

/// How a response will be merged, decided when the request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPlan {
    /// Start a new listing from the response.
    Replace,
    /// Append to the current listing.
    Append,
}

/// A fully planned games request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub plan: FetchPlan,
    pub fingerprint: Fingerprint,
    /// View state the listing reflects once this request commits.
    pub view: ViewState,
    pub query: GamesQuery,
}

/// An issued request awaiting execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFetch {
    pub token: RequestToken,
    pub request: FetchRequest,
}

impl PendingFetch {
    /// Perform the request. Never touches controller state.
    pub async fn execute(self, api: &dyn CatalogApi) -> FetchOutcome {
        debug!(token = %self.token, plan = ?self.request.plan, "Fetching games page");

        let started = Instant::now();
        let result = api.list_games(&self.request.query).await;
        let label = if result.is_ok() { "ok" } else { "failed" };
        GAMES_FETCH_DURATION
            .with_label_values(&[label])
            .observe(started.elapsed().as_secs_f64());

        FetchOutcome {
            pending: self,
            result,
        }
    }
}

/// A finished request, still tagged with its token.
#[derive(Debug)]
pub struct FetchOutcome {
    pub pending: PendingFetch,
    pub result: Result<PageResult, ApiError>,
}

impl FetchOutcome {
    pub fn token(&self) -> RequestToken {
        self.pending.token
    }
}

/// What the controller did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Listing updated.
    Committed { added: usize },
    /// Superseded by a newer request; nothing changed.
    Stale,
    /// Latest request failed; listing unchanged.
    Failed,
}

/// Everything the listing page needs to draw itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView<'a> {
    pub games: &'a [Game],
    pub total: Option<u64>,
    /// Filters and offset as shown in the address bar.
    pub selection: ViewState,
    pub loading: bool,
    pub show_empty_state: bool,
    pub show_load_more: bool,
    pub show_clear_filters: bool,
    pub category_filter_enabled: bool,
    pub publisher_filter_enabled: bool,
    /// Dismissible error notice.
    pub notice: Option<&'a str>,
}
