//! Errors surfaced to the catalog UI.

use thiserror::Error;

use crate::api::ApiError;

/// User-visible failure categories.
///
/// Malformed URL state is deliberately absent: the view-state codec
/// normalizes bad input instead of failing.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Categories or publishers could not be loaded; filters are disabled.
    #[error("Filter options unavailable ({kind}): {source}")]
    CatalogUnavailable {
        kind: FilterKind,
        #[source]
        source: ApiError,
    },

    /// A games page request failed.
    #[error("Failed to fetch games: {0}")]
    FetchFailed(#[source] ApiError),

    /// A single game lookup returned 404.
    #[error("Game {0} not found")]
    NotFound(u32),
}

/// Which filter collection an option belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Category,
    Publisher,
}

impl FilterKind {
    /// Query-string key used for this filter.
    pub fn param(&self) -> &'static str {
        match self {
            FilterKind::Category => "category",
            FilterKind::Publisher => "publisher",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterKind::Category => write!(f, "categories"),
            FilterKind::Publisher => write!(f, "publishers"),
        }
    }
}
