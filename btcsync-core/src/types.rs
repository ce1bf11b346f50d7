//! Common data structures and the `snapped_at` timestamp convention.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::SyncError;

/// One daily closing-price observation in a series.
///
/// `snapped_at` is the UTC calendar day the close belongs to; within a series
/// it is the uniqueness key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePoint {
    /// UTC date (midnight by convention) of the observation.
    pub snapped_at: NaiveDate,
    /// Daily closing price.
    pub price: Decimal,
}

impl PricePoint {
    /// Construct a point from its date key and closing price.
    #[must_use]
    pub const fn new(snapped_at: NaiveDate, price: Decimal) -> Self {
        Self { snapped_at, price }
    }
}

/// Render a date in the stored `YYYY-MM-DD 00:00:00 UTC` form.
///
/// Time-of-day is always midnight UTC; series operate at day resolution.
#[must_use]
pub fn format_snapped_at(date: NaiveDate) -> String {
    date.format("%Y-%m-%d 00:00:00 UTC").to_string()
}

/// Parse a stored `snapped_at` value back into its date.
///
/// The trailing ` UTC` zone marker is tolerated by stripping it before
/// datetime parsing.
///
/// # Errors
/// Returns `SyncError::StorageCorrupt` when the value does not parse; a
/// malformed timestamp must fail the run loudly rather than be skipped,
/// since skipping would corrupt the last-known-date computation.
pub fn parse_snapped_at(raw: &str) -> Result<NaiveDate, SyncError> {
    let trimmed = raw.trim();
    let without_zone = trimmed.strip_suffix(" UTC").unwrap_or(trimmed);
    NaiveDateTime::parse_from_str(without_zone, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .map_err(|e| SyncError::storage_corrupt(format!("bad snapped_at {raw:?}: {e}")))
}
