//! btcsync-mock
//!
//! Deterministic test doubles for the btcsync workspace: a fixture-driven
//! [`MockSource`], a scriptable [`ScriptedSource`] with call recording, and
//! an in-memory [`MemoryStore`].

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use btcsync_core::{PricePoint, PriceSource, SyncError};

mod scripted;

pub use scripted::{MemoryStore, ScriptedSource, SourceBehavior, SourceCall};

/// Mock price source for CI-safe tests and examples. Provides deterministic
/// per-day closes for any requested window.
///
/// Two magic symbols drive failure paths:
/// - `"FAIL"` fails the call immediately.
/// - `"TIMEOUT"` sleeps briefly before answering, long enough for callers
///   with a short fetch timeout to trip it.
pub struct MockSource;

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(symbol: &str) -> Result<(), SyncError> {
        match symbol {
            "FAIL" => Err(SyncError::source(
                "btcsync-mock",
                "forced failure: daily_closes",
            )),
            "TIMEOUT" => {
                // Keep short to avoid slowing tests excessively
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn base_cents(symbol: &str) -> i64 {
        match symbol {
            "BTC-USD" => 4_400_000,
            "BTC-EUR" => 4_050_000,
            _ => 10_000,
        }
    }

    /// The deterministic close this mock reports for `symbol` on `date`.
    #[must_use]
    pub fn close_for(symbol: &str, date: NaiveDate) -> Decimal {
        let drift = i64::from(date.num_days_from_ce() % 100);
        Decimal::new(Self::base_cents(symbol) + drift, 2)
    }
}

#[async_trait]
impl PriceSource for MockSource {
    fn name(&self) -> &'static str {
        "btcsync-mock"
    }

    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Result<Vec<PricePoint>, SyncError> {
        Self::maybe_fail_or_timeout(symbol).await?;
        Ok(start
            .iter_days()
            .take_while(|d| *d < end_exclusive)
            .map(|d| PricePoint::new(d, Self::close_for(symbol, d)))
            .collect())
    }
}
