use async_trait::async_trait;
use serde::Deserialize;

use btcsync_core::SyncError;

use crate::SOURCE_NAME;

/// Default public endpoint for the v8 chart API.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Deserialized subset of the chart payload. Fields the synchronizer does
/// not consume (OHLC besides close, volume, meta) are left out.
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    /// Top-level chart object.
    pub chart: Chart,
}

/// `chart` object: exactly one of `result` / `error` is populated in practice.
#[derive(Debug, Deserialize)]
pub struct Chart {
    /// Result blocks; the daily request yields at most one.
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    /// Provider-side error, if the request was rejected.
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// One result block: bar timestamps plus their quote indicators.
#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// UNIX timestamps (seconds) of the returned bars.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    /// Indicator container holding the quote block.
    pub indicators: Indicators,
}

/// `indicators` container.
#[derive(Debug, Deserialize)]
pub struct Indicators {
    /// Quote blocks aligned with `timestamp`; the daily request yields one.
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

/// Per-bar quote values; entries are null for days without data.
#[derive(Debug, Deserialize)]
pub struct QuoteBlock {
    /// Closing prices aligned with `timestamp`.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

/// Provider-side error payload.
#[derive(Debug, Deserialize)]
pub struct ChartError {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable description.
    pub description: String,
}

/// Chart transport abstraction (so we can inject fakes in tests).
#[async_trait]
pub trait ChartApi: Send + Sync {
    /// Fetch the daily chart for `symbol` over `[period1, period2)` UNIX
    /// seconds.
    async fn daily_chart(
        &self,
        symbol: &str,
        period1: i64,
        period2: i64,
    ) -> Result<ChartEnvelope, SyncError>;
}

/// Real transport over reqwest.
#[derive(Debug, Clone)]
pub struct HttpChartApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for HttpChartApi {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpChartApi {
    /// Transport against the public endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Transport against a custom endpoint, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ChartApi for HttpChartApi {
    async fn daily_chart(
        &self,
        symbol: &str,
        period1: i64,
        period2: i64,
    ) -> Result<ChartEnvelope, SyncError> {
        let url = format!("{}/v8/finance/chart/{symbol}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await
            .map_err(|e| SyncError::source(SOURCE_NAME, format!("request failed for {symbol}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::source(
                SOURCE_NAME,
                format!("status {status}: history for {symbol}"),
            ));
        }

        response
            .json::<ChartEnvelope>()
            .await
            .map_err(|e| SyncError::source(SOURCE_NAME, format!("malformed chart payload for {symbol}: {e}")))
    }
}
