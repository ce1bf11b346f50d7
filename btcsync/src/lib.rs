//! btcsync
//!
//! Incremental synchronizer for BTC daily-close CSV series.
//!
//! Each configured series pairs a provider symbol with a CSV destination.
//! A run loads the stored rows, computes the missing date window, fetches
//! the gap from a [`PriceSource`], merges with first-wins dedup in favor of
//! already-persisted rows, and atomically rewrites the file. Running twice
//! with no time elapsed is a no-op: the second run sees the just-written
//! data and fetches nothing.
//!
//! The pipeline is the same for every series; the USD/EUR pairing is plain
//! configuration (see [`SyncConfig::btc_defaults`]).
#![warn(missing_docs)]

/// Run configuration: series pairings and fetch timeout.
pub mod config;
/// Per-run outcome and failure reporting.
pub mod report;
/// The synchronizer pipeline.
pub mod sync;

pub use btcsync_core::{
    CsvStore, PricePoint, PriceSource, SeriesStore, SyncError, format_snapped_at, merge_points,
};
pub use config::{BTC_EUR, BTC_USD, DEFAULT_FETCH_TIMEOUT, SeriesConfig, SyncConfig};
pub use report::{SeriesFailure, SeriesOutcome, SyncReport};
pub use sync::{Synchronizer, SynchronizerBuilder, last_stored_date};
