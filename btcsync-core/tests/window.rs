use btcsync_core::{EPOCH_FLOOR, FetchWindow};
use chrono::NaiveDate;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn cold_start_opens_at_epoch_floor() {
    let today = d(2024, 1, 7);
    let w = FetchWindow::compute(None, today).unwrap();
    assert_eq!(w.start, EPOCH_FLOOR);
    assert_eq!(w.start, d(2013, 1, 1));
    assert_eq!(w.end_inclusive, today);
}

#[test]
fn resumes_on_day_after_last_stored_date() {
    let w = FetchWindow::compute(Some(d(2024, 1, 5)), d(2024, 1, 7)).unwrap();
    assert_eq!(w.start, d(2024, 1, 6));
    assert_eq!(w.end_inclusive, d(2024, 1, 7));
    assert_eq!(w.days(), 2);
}

#[test]
fn series_current_through_today_yields_no_window() {
    let today = d(2024, 1, 7);
    assert!(FetchWindow::compute(Some(today), today).is_none());
}

#[test]
fn last_date_past_today_yields_no_window() {
    assert!(FetchWindow::compute(Some(d(2024, 1, 8)), d(2024, 1, 7)).is_none());
}

#[test]
fn single_day_window_when_exactly_one_day_behind() {
    let w = FetchWindow::compute(Some(d(2024, 1, 6)), d(2024, 1, 7)).unwrap();
    assert_eq!(w.start, d(2024, 1, 7));
    assert_eq!(w.days(), 1);
}

#[test]
fn provider_upper_bound_is_exclusive() {
    let w = FetchWindow::compute(Some(d(2024, 1, 5)), d(2024, 1, 7)).unwrap();
    assert_eq!(w.end_exclusive(), d(2024, 1, 8));
}
