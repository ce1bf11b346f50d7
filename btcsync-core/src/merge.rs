use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::PricePoint;

/// Merge price series in priority order (first is highest).
///
/// - Points are keyed by `snapped_at`; the first appearance wins for
///   duplicates, so callers pass existing storage ahead of freshly fetched
///   rows to preserve already-persisted values on collision.
/// - The result is sorted ascending by date with exactly one row per date.
#[must_use]
pub fn merge_points<I>(series: I) -> Vec<PricePoint>
where
    I: IntoIterator<Item = Vec<PricePoint>>,
{
    let mut map: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for s in series {
        for p in s {
            map.entry(p.snapped_at).or_insert(p.price);
        }
    }
    map.into_iter()
        .map(|(snapped_at, price)| PricePoint::new(snapped_at, price))
        .collect()
}
