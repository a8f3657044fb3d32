//! Orchestration of URL, filter selections and paginated fetches.
//!
//! Every event that needs data returns a [`PendingFetch`] tagged with a
//! freshly minted [`RequestToken`]. Only the outcome carrying the most
//! recently issued token is committed; anything older is dropped.

mod engine;
mod types;

pub use engine::CatalogController;
pub use types::*;

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::error::FilterKind;

/// Rejected controller events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// The options for this filter failed to load.
    #[error("Filter options for {0} are unavailable")]
    FiltersUnavailable(FilterKind),

    /// The selected id is not one of the loaded options.
    #[error("Unknown option {id} for {kind}")]
    UnknownOption { kind: FilterKind, id: u32 },

    /// Retry was requested without a failed request.
    #[error("No failed request to retry")]
    NothingToRetry,
}

/// Failure to build a controller from configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build catalog API client: {0}")]
    Api(#[from] ApiError),
}
