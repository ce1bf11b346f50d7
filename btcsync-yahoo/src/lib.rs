//! btcsync-yahoo
//!
//! `PriceSource` implementation over the Yahoo Finance v8 chart API.
//!
//! The HTTP transport sits behind the [`adapter::ChartApi`] trait so tests
//! can inject fakes or point the real client at a local mock server. Chart
//! payload handling snaps every bar timestamp to its UTC date, skips null
//! closes, and normalizes provider failures to [`SyncError::Source`].
#![warn(missing_docs)]

/// Transport seam and chart payload types.
pub mod adapter;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;

use btcsync_core::{PricePoint, PriceSource, SyncError};

use adapter::{ChartApi, ChartEnvelope, HttpChartApi};

/// Source name used for error attribution and logging.
pub const SOURCE_NAME: &str = "btcsync-yahoo";

/// Daily-close price source backed by the Yahoo chart API.
pub struct YahooSource {
    chart: Arc<dyn ChartApi>,
}

impl Default for YahooSource {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooSource {
    /// Source against the public Yahoo endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chart: Arc::new(HttpChartApi::new()),
        }
    }

    /// Source against a custom endpoint, e.g. a local mock server in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            chart: Arc::new(HttpChartApi::with_base_url(base_url)),
        }
    }

    /// Source over an injected transport (test seam).
    #[must_use]
    pub fn from_adapter(chart: Arc<dyn ChartApi>) -> Self {
        Self { chart }
    }
}

#[async_trait]
impl PriceSource for YahooSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Result<Vec<PricePoint>, SyncError> {
        if symbol.trim().is_empty() {
            return Err(SyncError::invalid_arg("empty symbol"));
        }
        if start >= end_exclusive {
            return Ok(Vec::new());
        }

        let period1 = start.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp());
        let period2 = end_exclusive
            .and_hms_opt(0, 0, 0)
            .map_or(i64::MAX, |dt| dt.and_utc().timestamp());

        let envelope = self.chart.daily_chart(symbol, period1, period2).await?;
        points_from_chart(symbol, envelope, start, end_exclusive)
    }
}

/// Convert a chart payload into day-keyed closing prices within the window.
///
/// Bars arrive with exchange-local session timestamps; each is snapped to
/// its UTC date. Null closes (days without data) are skipped, and when the
/// provider reports several bars for one date the last sample wins.
fn points_from_chart(
    symbol: &str,
    envelope: ChartEnvelope,
    start: NaiveDate,
    end_exclusive: NaiveDate,
) -> Result<Vec<PricePoint>, SyncError> {
    let chart = envelope.chart;
    if let Some(err) = chart.error {
        return Err(SyncError::source(
            SOURCE_NAME,
            format!("{}: {} ({symbol})", err.code, err.description),
        ));
    }

    let Some(result) = chart
        .result
        .and_then(|mut blocks| (!blocks.is_empty()).then(|| blocks.remove(0)))
    else {
        return Ok(Vec::new());
    };

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for (ts, close) in result.timestamp.into_iter().zip(closes) {
        let Some(close) = close else { continue };
        let date = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| {
                SyncError::source(SOURCE_NAME, format!("bad bar timestamp {ts} for {symbol}"))
            })?
            .date_naive();
        if date < start || date >= end_exclusive {
            continue;
        }
        let price = Decimal::try_from(close).map_err(|e| {
            SyncError::source(
                SOURCE_NAME,
                format!("unrepresentable close {close} for {symbol}: {e}"),
            )
        })?;
        by_date.insert(date, price.normalize());
    }

    Ok(by_date
        .into_iter()
        .map(|(date, price)| PricePoint::new(date, price))
        .collect())
}
