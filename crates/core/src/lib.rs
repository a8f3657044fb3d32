pub mod api;
pub mod config;
pub mod controller;
pub mod detail;
pub mod error;
pub mod filters;
pub mod history;
pub mod metrics;
pub mod pagination;
pub mod testing;
pub mod view_state;

pub use api::{ApiError, CatalogApi, FilterOption, Game, GamesQuery, HttpCatalogApi, PageResult};
pub use config::{
    load_config, load_config_from_str, validate_config, ApiConfig, Config, ConfigError,
    PaginationConfig,
};
pub use controller::{
    CatalogController, Completion, ControllerError, ControllerState, FetchOutcome, FetchPlan,
    FetchRequest, ListingView, PendingFetch, RequestToken, SetupError,
};
pub use detail::{fetch_game, load_detail, parse_detail_path, DetailState};
pub use error::{CatalogError, FilterKind};
pub use filters::{CatalogLoadReport, FilterCatalog, FilterLookup, FilterOptionSet};
pub use history::{History, HistoryMode, MemoryHistory};
pub use pagination::{AccumulatedListing, AppendSummary, PaginationAccumulator, PaginationError};
pub use view_state::{Fingerprint, ViewState, ViewStateCodec};
