use chrono::NaiveDate;

/// Fixed floor for cold-start fetches when a series has no stored data yet.
pub const EPOCH_FLOOR: NaiveDate = NaiveDate::from_ymd_opt(2013, 1, 1).expect("valid epoch floor");

/// Inclusive date range to request from a price source for one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    /// First missing day.
    pub start: NaiveDate,
    /// Caller's current UTC date at invocation time.
    pub end_inclusive: NaiveDate,
}

impl FetchWindow {
    /// Compute the fetch window from the last stored date.
    ///
    /// With no stored data the window opens at [`EPOCH_FLOOR`]; otherwise the
    /// day after `last_date`. Returns `None` when the series is already
    /// current (`start > today`), in which case no fetch occurs.
    #[must_use]
    pub fn compute(last_date: Option<NaiveDate>, today: NaiveDate) -> Option<Self> {
        let start = match last_date {
            Some(last) => last.succ_opt()?,
            None => EPOCH_FLOOR,
        };
        if start > today {
            return None;
        }
        Some(Self {
            start,
            end_inclusive: today,
        })
    }

    /// Exclusive upper bound to hand to providers whose `end` parameter is
    /// exclusive.
    #[must_use]
    pub fn end_exclusive(&self) -> NaiveDate {
        self.end_inclusive.succ_opt().unwrap_or(NaiveDate::MAX)
    }

    /// Number of calendar days covered by the window.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end_inclusive - self.start).num_days() + 1
    }
}
