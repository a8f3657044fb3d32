use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::types::{
    Completion, ControllerState, FetchOutcome, FetchPlan, FetchRequest, ListingView,
    PendingFetch, RequestToken,
};
use super::{ControllerError, SetupError};
use crate::api::{CatalogApi, GamesQuery, HttpCatalogApi, PageResult};
use crate::config::{load_config, validate_config, Config, PaginationConfig};
use crate::error::{CatalogError, FilterKind};
use crate::filters::{FilterCatalog, FilterLookup};
use crate::history::{History, HistoryMode};
use crate::metrics::GAMES_FETCHES;
use crate::pagination::PaginationAccumulator;
use crate::view_state::{ViewState, ViewStateCodec};

/// Single owner of the listing's view state and accumulated games.
pub struct CatalogController<H: History> {
    api: Arc<dyn CatalogApi>,
    filters: Arc<FilterCatalog>,
    codec: ViewStateCodec,
    pagination: PaginationConfig,
    history: H,
    /// What the address bar says.
    view: ViewState,
    accumulator: PaginationAccumulator,
    /// Offset of the last committed page for the accumulator's fingerprint.
    committed_offset: Option<u32>,
    state: ControllerState,
    last_token: u64,
    in_flight: Option<RequestToken>,
    last_request: Option<FetchRequest>,
    last_error: Option<CatalogError>,
    notice: Option<String>,
}

impl<H: History> CatalogController<H> {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        filters: Arc<FilterCatalog>,
        pagination: PaginationConfig,
        history: H,
    ) -> Self {
        let pagination = PaginationConfig {
            page_size: pagination.page_size.max(1),
            ..pagination
        };
        Self {
            api,
            filters,
            codec: ViewStateCodec::new(pagination.page_size),
            pagination,
            history,
            view: ViewState::default(),
            accumulator: PaginationAccumulator::new(),
            committed_offset: None,
            state: ControllerState::Idle,
            last_token: 0,
            in_flight: None,
            last_request: None,
            last_error: None,
            notice: None,
        }
    }

    /// Build a controller talking HTTP to the configured API.
    pub fn from_config(config: &Config, history: H) -> Result<Self, SetupError> {
        validate_config(config)?;
        let api: Arc<dyn CatalogApi> = Arc::new(HttpCatalogApi::new(&config.api)?);
        let filters = Arc::new(FilterCatalog::new(Arc::clone(&api)));
        Ok(Self::new(api, filters, config.pagination, history))
    }

    /// [`CatalogController::from_config`] over a TOML file with
    /// `GAMECATALOG_` environment overrides.
    pub fn from_config_file(path: &Path, history: H) -> Result<Self, SetupError> {
        let config = load_config(path)?;
        Self::from_config(&config, history)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn api(&self) -> Arc<dyn CatalogApi> {
        Arc::clone(&self.api)
    }

    pub fn filters(&self) -> &Arc<FilterCatalog> {
        &self.filters
    }

    pub fn codec(&self) -> &ViewStateCodec {
        &self.codec
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// For the embedding shell to move through history before calling
    /// [`CatalogController::navigate`].
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn view_state(&self) -> ViewState {
        self.view
    }

    pub fn accumulator(&self) -> &PaginationAccumulator {
        &self.accumulator
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ControllerState::Loading(_))
    }

    pub fn last_error(&self) -> Option<&CatalogError> {
        self.last_error.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Load filter options, then fetch whatever the current URL describes.
    ///
    /// Option load failures only disable the affected filter.
    pub async fn mount(&mut self) -> PendingFetch {
        let report = self.filters.load_all().await;
        for err in report.errors() {
            warn!(error = %err, "Filters degraded to \"All\"");
        }
        self.navigate()
    }

    /// Manual reload of filter options after a failure.
    ///
    /// Returns a fetch when the URL now decodes to different filters, even
    /// if only one of the collections recovered.
    pub async fn reload_filters(&mut self) -> Option<PendingFetch> {
        let report = self.filters.load_all().await;
        for err in report.errors() {
            warn!(error = %err, "Filters still unavailable after reload");
        }

        let target = self.decode_current();
        if target.fingerprint() == self.view.fingerprint() {
            return None;
        }
        Some(self.navigate())
    }

    /// React to the URL having changed (initial load, back/forward).
    pub fn navigate(&mut self) -> PendingFetch {
        let current = self.history.current_query();
        let decoded = self.decode_current();
        let pending = self.begin(decoded);

        // Rewrite non-canonical URLs, unless options are missing and the
        // ids could still become valid after a reload.
        let canonical = self.codec.encode(&pending.request.view);
        if canonical != current.trim_start_matches('?') && self.filters.is_available() {
            debug!(from = %current, to = %canonical, "Normalizing URL");
            self.history.update(&canonical, HistoryMode::Replace);
        }

        pending
    }

    /// Change one filter; pagination restarts and a history entry is pushed.
    ///
    /// Returns `Ok(None)` when the value is already selected.
    pub fn change_filter(
        &mut self,
        kind: FilterKind,
        value: Option<u32>,
    ) -> Result<Option<PendingFetch>, ControllerError> {
        if !self.filters.is_loaded(kind) {
            return Err(ControllerError::FiltersUnavailable(kind));
        }
        if let Some(id) = value {
            if !self.filters.contains(kind, id) {
                return Err(ControllerError::UnknownOption { kind, id });
            }
        }
        if self.view.filter(kind) == value {
            return Ok(None);
        }

        let target = self.view.with_filter(kind, value);
        Ok(Some(self.begin_with_url(target, HistoryMode::Push)))
    }

    /// Drop both filters. `None` when no filter is active.
    pub fn clear_filters(&mut self) -> Option<PendingFetch> {
        if !self.view.has_filters() {
            return None;
        }
        Some(self.begin_with_url(ViewState::default(), HistoryMode::Push))
    }

    /// Request the next page of the current listing.
    ///
    /// `None` while a fetch is in flight or when the server reported no
    /// further pages.
    pub fn load_more(&mut self) -> Option<PendingFetch> {
        if self.is_loading() || !self.accumulator.has_more() {
            return None;
        }
        if !self.holds_current_listing() {
            return None;
        }
        let committed = self.committed_offset?;

        let target = ViewState {
            offset: committed + self.pagination.page_size,
            ..self.view
        };
        Some(self.begin_with_url(target, HistoryMode::Replace))
    }

    /// Re-issue the request that failed, under a new token.
    pub fn retry(&mut self) -> Result<PendingFetch, ControllerError> {
        if self.state != ControllerState::Error {
            return Err(ControllerError::NothingToRetry);
        }
        let request = self.last_request.ok_or(ControllerError::NothingToRetry)?;
        Ok(self.issue(request))
    }

    /// Hide the error notice; the listing stays as it is.
    ///
    /// Only a listing that belongs to the current selection counts as loaded.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        if self.state == ControllerState::Error {
            self.state = if self.accumulator.has_page() && self.holds_current_listing() {
                ControllerState::Loaded
            } else {
                ControllerState::Idle
            };
        }
    }

    /// Execute and complete in one step.
    pub async fn dispatch(&mut self, pending: PendingFetch) -> Completion {
        let api = Arc::clone(&self.api);
        let outcome = pending.execute(api.as_ref()).await;
        self.complete(outcome)
    }

    /// Commit an outcome if it belongs to the latest request.
    pub fn complete(&mut self, outcome: FetchOutcome) -> Completion {
        let token = outcome.token();
        if self.in_flight != Some(token) {
            debug!(%token, latest = self.last_token, "Dropping stale games response");
            GAMES_FETCHES.with_label_values(&["stale"]).inc();
            return Completion::Stale;
        }
        self.in_flight = None;

        let request = outcome.pending.request;
        match outcome.result {
            Ok(page) => self.commit(token, request, page),
            Err(source) => {
                warn!(%token, error = %source, "Games fetch failed");
                GAMES_FETCHES.with_label_values(&["failed"]).inc();
                self.notice = Some(format!("Couldn't load games: {}", source));
                self.last_error = Some(CatalogError::FetchFailed(source));
                self.state = ControllerState::Error;
                Completion::Failed
            }
        }
    }

    /// Snapshot for rendering.
    pub fn render(&self) -> ListingView<'_> {
        let loading = self.is_loading();
        let listing = self.accumulator.listing();
        let current = self.holds_current_listing();

        ListingView {
            games: &listing.games,
            total: if current { listing.total } else { None },
            selection: self.view,
            loading,
            // Only after the fenced response, never speculatively
            show_empty_state: self.state == ControllerState::Loaded
                && current
                && listing.games.is_empty()
                && listing.total == Some(0),
            show_load_more: !loading && current && self.accumulator.has_more(),
            show_clear_filters: self.view.has_filters(),
            category_filter_enabled: self.filters.is_loaded(FilterKind::Category),
            publisher_filter_enabled: self.filters.is_loaded(FilterKind::Publisher),
            notice: self.notice.as_deref(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn holds_current_listing(&self) -> bool {
        self.accumulator.fingerprint() == Some(self.view.fingerprint())
    }

    fn decode_current(&self) -> ViewState {
        let query = self.history.current_query();
        self.codec.decode(&query, self.filters.as_ref())
    }

    fn begin_with_url(&mut self, target: ViewState, mode: HistoryMode) -> PendingFetch {
        let pending = self.begin(target);
        let query = self.codec.encode(&pending.request.view);
        self.history.update(&query, mode);
        pending
    }

    fn begin(&mut self, target: ViewState) -> PendingFetch {
        let request = self.plan(target);
        self.issue(request)
    }

    fn issue(&mut self, request: FetchRequest) -> PendingFetch {
        self.last_token += 1;
        let token = RequestToken(self.last_token);

        self.view = request.view;
        self.in_flight = Some(token);
        self.last_request = Some(request);
        self.state = ControllerState::Loading(token);

        debug!(
            %token,
            plan = ?request.plan,
            fingerprint = %request.fingerprint,
            offset = request.query.offset,
            limit = request.query.limit,
            "Issued games request"
        );

        PendingFetch { token, request }
    }

    /// Append when `target` is exactly the next page of the held listing,
    /// otherwise rebuild the listing from offset 0 up to `target`.
    fn plan(&self, target: ViewState) -> FetchRequest {
        let page_size = self.pagination.page_size;
        let fingerprint = target.fingerprint();

        let is_next_page = self.accumulator.fingerprint() == Some(fingerprint)
            && self.committed_offset.map(|o| o + page_size) == Some(target.offset);

        if is_next_page {
            return FetchRequest {
                plan: FetchPlan::Append,
                fingerprint,
                view: target,
                query: GamesQuery {
                    limit: page_size,
                    offset: target.offset,
                    category_id: target.category_id,
                    publisher_id: target.publisher_id,
                },
            };
        }

        let deepest = (self.pagination.max_limit / page_size).saturating_sub(1) * page_size;
        let view = if target.offset > deepest {
            info!(
                requested = target.offset,
                restored = deepest,
                "Offset deeper than a single request can restore"
            );
            ViewState {
                offset: deepest,
                ..target
            }
        } else {
            target
        };

        FetchRequest {
            plan: FetchPlan::Replace,
            fingerprint,
            view,
            query: GamesQuery {
                limit: view.offset + page_size,
                offset: 0,
                category_id: view.category_id,
                publisher_id: view.publisher_id,
            },
        }
    }

    fn commit(
        &mut self,
        token: RequestToken,
        request: FetchRequest,
        page: PageResult,
    ) -> Completion {
        let summary = match request.plan {
            FetchPlan::Replace => self.accumulator.replace(request.fingerprint, page),
            FetchPlan::Append => match self.accumulator.append(request.fingerprint, page) {
                Ok(summary) => summary,
                Err(err) => {
                    warn!(%token, error = %err, "Discarding page for another listing");
                    GAMES_FETCHES.with_label_values(&["stale"]).inc();
                    self.state = if self.accumulator.has_page() && self.holds_current_listing() {
                        ControllerState::Loaded
                    } else {
                        ControllerState::Idle
                    };
                    return Completion::Stale;
                }
            },
        };

        self.committed_offset = Some(request.view.offset);
        self.state = ControllerState::Loaded;
        self.notice = None;
        self.last_error = None;
        GAMES_FETCHES.with_label_values(&["committed"]).inc();

        info!(
            %token,
            fingerprint = %request.fingerprint,
            added = summary.added,
            loaded = self.accumulator.len(),
            total = ?self.accumulator.listing().total,
            has_more = self.accumulator.has_more(),
            "Committed games page"
        );

        Completion::Committed {
            added: summary.added,
        }
    }
}
