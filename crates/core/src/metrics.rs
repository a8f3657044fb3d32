//! Prometheus metrics for the catalog engine.
//!
//! This module provides metrics for:
//! - Games page fetches (committed, stale, failed)
//! - Filter option loads

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Listing Metrics
// =============================================================================

/// Games page fetches by result.
pub static GAMES_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gamecatalog_games_fetches_total", "Total games page fetches"),
        &["result"], // "committed", "stale", "failed"
    )
    .unwrap()
});

/// Games page fetch duration in seconds.
pub static GAMES_FETCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gamecatalog_games_fetch_duration_seconds",
            "Duration of games page fetches",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["result"], // "ok", "failed"
    )
    .unwrap()
});

// =============================================================================
// Filter Catalog Metrics
// =============================================================================

/// Filter option loads by result.
pub static FILTER_CATALOG_LOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "gamecatalog_filter_catalog_loads_total",
            "Total category/publisher option loads",
        ),
        &["result"], // "ok", "failed"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(GAMES_FETCHES.clone()),
        Box::new(GAMES_FETCH_DURATION.clone()),
        Box::new(FILTER_CATALOG_LOADS.clone()),
    ]
}
