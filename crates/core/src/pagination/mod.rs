//! Accumulation of paginated game listings.
//!
//! The listing belongs to exactly one [`Fingerprint`]. Pages for that
//! fingerprint are appended in arrival order; a different fingerprint
//! replaces the listing wholesale.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::api::{Game, PageResult};
use crate::view_state::Fingerprint;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    /// A page was offered for a dataset the accumulator is not holding.
    #[error("Page for [{page}] does not match accumulated listing [{current:?}]")]
    FingerprintMismatch {
        current: Option<Fingerprint>,
        page: Fingerprint,
    },
}

/// Games loaded so far for one fingerprint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccumulatedListing {
    pub games: Vec<Game>,
    /// `None` until the first page arrives.
    pub total: Option<u64>,
    /// `None` until the first page arrives.
    pub has_more: Option<bool>,
}

/// What an append did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendSummary {
    pub added: usize,
    pub duplicates: usize,
}

#[derive(Debug, Default)]
pub struct PaginationAccumulator {
    fingerprint: Option<Fingerprint>,
    listing: AccumulatedListing,
    seen: HashSet<u32>,
}

impl PaginationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint of the held listing; `None` before the first reset.
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.fingerprint
    }

    pub fn listing(&self) -> &AccumulatedListing {
        &self.listing
    }

    pub fn games(&self) -> &[Game] {
        &self.listing.games
    }

    pub fn len(&self) -> usize {
        self.listing.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listing.games.is_empty()
    }

    /// Server-reported "has more"; false while unknown.
    pub fn has_more(&self) -> bool {
        self.listing.has_more.unwrap_or(false)
    }

    /// Whether at least one page has been received for the fingerprint.
    pub fn has_page(&self) -> bool {
        self.listing.total.is_some()
    }

    /// Drop everything and start holding `fingerprint`.
    pub fn reset(&mut self, fingerprint: Fingerprint) {
        debug!(%fingerprint, "Resetting accumulated listing");
        self.fingerprint = Some(fingerprint);
        self.listing = AccumulatedListing::default();
        self.seen.clear();
    }

    /// Append a page produced for `fingerprint`.
    pub fn append(
        &mut self,
        fingerprint: Fingerprint,
        page: PageResult,
    ) -> Result<AppendSummary, PaginationError> {
        if self.fingerprint != Some(fingerprint) {
            return Err(PaginationError::FingerprintMismatch {
                current: self.fingerprint,
                page: fingerprint,
            });
        }

        let summary = self.push_page(page);
        if summary.duplicates > 0 {
            debug!(
                %fingerprint,
                duplicates = summary.duplicates,
                "Skipped games already in listing"
            );
        }

        Ok(summary)
    }

    /// Reset to `fingerprint` and append `page` as a single commit.
    pub fn replace(&mut self, fingerprint: Fingerprint, page: PageResult) -> AppendSummary {
        self.reset(fingerprint);
        self.push_page(page)
    }

    fn push_page(&mut self, page: PageResult) -> AppendSummary {
        let mut summary = AppendSummary {
            added: 0,
            duplicates: 0,
        };
        for game in page.games {
            if self.seen.insert(game.id) {
                self.listing.games.push(game);
                summary.added += 1;
            } else {
                summary.duplicates += 1;
            }
        }

        // Server is authoritative for both
        self.listing.total = Some(page.total);
        self.listing.has_more = Some(page.has_more);
        summary
    }
}
