use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};

use btcsync_core::{CsvStore, FetchWindow, PriceSource, SeriesStore, SyncError, merge_points};

use crate::config::{DEFAULT_FETCH_TIMEOUT, SyncConfig};
use crate::report::{SeriesFailure, SeriesOutcome, SyncReport};

/// Last stored date of a series, if any data exists.
///
/// Absent storage and present-but-empty storage both yield `None`.
///
/// # Errors
/// Propagates `SyncError::StorageCorrupt` from unparseable stored rows; a
/// corrupt file must fail the run rather than skew the resume point.
pub fn last_stored_date(store: &dyn SeriesStore) -> Result<Option<NaiveDate>, SyncError> {
    let points = store.load()?;
    Ok(points.iter().map(|p| p.snapped_at).max())
}

/// Orchestrator that runs the incremental sync pipeline over configured
/// series: resume point → fetch window → fetch → merge → persist.
pub struct Synchronizer {
    source: Arc<dyn PriceSource>,
    fetch_timeout: Duration,
}

impl std::fmt::Debug for Synchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synchronizer")
            .field("fetch_timeout", &self.fetch_timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`Synchronizer`].
pub struct SynchronizerBuilder {
    source: Option<Arc<dyn PriceSource>>,
    fetch_timeout: Duration,
}

impl Default for SynchronizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SynchronizerBuilder {
    /// Create a builder with the default fetch timeout and no source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Register the price source to fetch from.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Bound a single source fetch. Expiry fails that series' run only;
    /// the next scheduled run retries naturally.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Build the synchronizer.
    ///
    /// # Errors
    /// Returns `SyncError::InvalidArg` when no source was registered.
    pub fn build(self) -> Result<Synchronizer, SyncError> {
        let source = self
            .source
            .ok_or_else(|| SyncError::invalid_arg("no price source registered"))?;
        Ok(Synchronizer {
            source,
            fetch_timeout: self.fetch_timeout,
        })
    }
}

impl Synchronizer {
    /// Start building a synchronizer.
    #[must_use]
    pub fn builder() -> SynchronizerBuilder {
        SynchronizerBuilder::new()
    }

    /// Sync one series up to the current UTC date.
    ///
    /// # Errors
    /// Returns the first error of the pipeline: corrupt or unreadable
    /// storage, fetch failure, fetch timeout, or a failed rewrite.
    pub async fn sync_series(
        &self,
        symbol: &str,
        store: &dyn SeriesStore,
    ) -> Result<SeriesOutcome, SyncError> {
        self.sync_series_as_of(symbol, store, Utc::now().date_naive())
            .await
    }

    /// Sync one series against an explicit `today`, for deterministic runs.
    ///
    /// # Errors
    /// See [`Synchronizer::sync_series`].
    pub async fn sync_series_as_of(
        &self,
        symbol: &str,
        store: &dyn SeriesStore,
        today: NaiveDate,
    ) -> Result<SeriesOutcome, SyncError> {
        let existing = store.load()?;
        let last_date = existing.iter().map(|p| p.snapped_at).max();

        let Some(window) = FetchWindow::compute(last_date, today) else {
            tracing::info!(symbol, destination = %store.describe(), "no new days to fetch");
            return Ok(SeriesOutcome {
                symbol: symbol.to_string(),
                destination: store.describe(),
                rows_added: 0,
                total_rows: existing.len(),
            });
        };

        let fetched = self.fetch(symbol, window).await?;
        if fetched.is_empty() {
            tracing::info!(
                symbol,
                start = %window.start,
                end = %window.end_inclusive,
                "source returned no new data"
            );
            return Ok(SeriesOutcome {
                symbol: symbol.to_string(),
                destination: store.describe(),
                rows_added: 0,
                total_rows: existing.len(),
            });
        }

        let rows_added = fetched.len();
        // Existing storage goes first: on date collisions the persisted
        // value wins over the freshly fetched one.
        let merged = merge_points([existing, fetched]);
        store.write_all(&merged)?;

        tracing::info!(
            symbol,
            destination = %store.describe(),
            rows_added,
            total_rows = merged.len(),
            "series updated"
        );
        Ok(SeriesOutcome {
            symbol: symbol.to_string(),
            destination: store.describe(),
            rows_added,
            total_rows: merged.len(),
        })
    }

    async fn fetch(
        &self,
        symbol: &str,
        window: FetchWindow,
    ) -> Result<Vec<btcsync_core::PricePoint>, SyncError> {
        let fut = self
            .source
            .daily_closes(symbol, window.start, window.end_exclusive());
        match tokio::time::timeout(self.fetch_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::source_timeout(self.source.name(), symbol)),
        }
    }

    /// Sync every configured series up to the current UTC date.
    pub async fn sync_all(&self, config: &SyncConfig) -> SyncReport {
        self.sync_all_as_of(config, Utc::now().date_naive()).await
    }

    /// Sync every configured series against an explicit `today`.
    ///
    /// Series are processed sequentially and independently: a failure is
    /// caught at the per-series boundary, recorded in the report, and does
    /// not prevent the remaining series from being attempted.
    pub async fn sync_all_as_of(&self, config: &SyncConfig, today: NaiveDate) -> SyncReport {
        let mut report = SyncReport::default();
        for series in &config.series {
            let store = CsvStore::new(&series.path);
            match self.sync_series_as_of(&series.symbol, &store, today).await {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(error) => {
                    tracing::error!(
                        symbol = %series.symbol,
                        destination = %store.describe(),
                        %error,
                        "series sync failed"
                    );
                    report.failures.push(SeriesFailure {
                        symbol: series.symbol.clone(),
                        error,
                    });
                }
            }
        }
        report
    }
}
