use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{PricePoint, SyncError};

/// Collaborator trait for market-data connectors that supply daily closes.
///
/// Implementations may omit days for which they have no data, and must not
/// fabricate data. Points are day-resolution with the midnight-UTC convention.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Stable source name used for error attribution and logging.
    fn name(&self) -> &'static str;

    /// Fetch daily closing prices for `symbol` over `[start, end_exclusive)`.
    ///
    /// The upper bound is exclusive, matching typical provider APIs. An empty
    /// result is a normal outcome (window in the future, provider lag).
    ///
    /// # Errors
    /// Returns `SyncError::Source` when the provider is unreachable or
    /// returns a malformed response.
    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Result<Vec<PricePoint>, SyncError>;
}
