use serde::Serialize;

use btcsync_core::SyncError;

/// Outcome of one successfully processed series.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesOutcome {
    /// Provider symbol of the series.
    pub symbol: String,
    /// Storage destination the series was written to.
    pub destination: String,
    /// Number of points the fetch step supplied. This is the observable
    /// reporting quantity, not the net growth after dedup.
    pub rows_added: usize,
    /// Stored row count after the run.
    pub total_rows: usize,
}

/// A series whose sync failed; siblings are unaffected.
#[derive(Debug)]
pub struct SeriesFailure {
    /// Provider symbol of the failing series.
    pub symbol: String,
    /// Cause of the failure.
    pub error: SyncError,
}

/// Aggregate result of a `sync_all` run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Per-series outcomes, in configuration order.
    pub outcomes: Vec<SeriesOutcome>,
    /// Per-series failures, in configuration order.
    pub failures: Vec<SeriesFailure>,
}

impl SyncReport {
    /// Whether every configured series synced without error. A run that
    /// found no new data is still a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total rows supplied by fetches across all series.
    #[must_use]
    pub fn rows_added(&self) -> usize {
        self.outcomes.iter().map(|o| o.rows_added).sum()
    }
}
