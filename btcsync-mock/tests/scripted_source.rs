use btcsync_core::{PricePoint, PriceSource, SeriesStore, SyncError};
use btcsync_mock::{MemoryStore, MockSource, ScriptedSource, SourceBehavior};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn mock_source_is_deterministic_per_day() {
    let source = MockSource::new();
    let a = source
        .daily_closes("BTC-USD", d(2024, 1, 1), d(2024, 1, 6))
        .await
        .unwrap();
    let b = source
        .daily_closes("BTC-USD", d(2024, 1, 1), d(2024, 1, 6))
        .await
        .unwrap();

    assert_eq!(a.len(), 5);
    assert_eq!(a, b);
    assert_eq!(a[0].snapped_at, d(2024, 1, 1));
    assert_eq!(a[4].snapped_at, d(2024, 1, 5));
    assert_eq!(a[0].price, MockSource::close_for("BTC-USD", d(2024, 1, 1)));
}

#[tokio::test]
async fn mock_source_usd_and_eur_series_differ() {
    let source = MockSource::new();
    let usd = source
        .daily_closes("BTC-USD", d(2024, 1, 1), d(2024, 1, 2))
        .await
        .unwrap();
    let eur = source
        .daily_closes("BTC-EUR", d(2024, 1, 1), d(2024, 1, 2))
        .await
        .unwrap();
    assert_ne!(usd[0].price, eur[0].price);
}

#[tokio::test]
async fn mock_source_fail_symbol_forces_an_error() {
    let err = MockSource::new()
        .daily_closes("FAIL", d(2024, 1, 1), d(2024, 1, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Source { .. }), "{err}");
}

#[tokio::test]
async fn scripted_source_replays_queue_in_order_and_records_calls() {
    let source = ScriptedSource::new();
    let point = PricePoint::new(d(2024, 1, 6), Decimal::from(44_000));
    source.enqueue_points(vec![point]).await;
    source
        .enqueue(SourceBehavior::Fail(SyncError::source("test", "boom")))
        .await;

    let first = source
        .daily_closes("BTC-USD", d(2024, 1, 6), d(2024, 1, 8))
        .await
        .unwrap();
    assert_eq!(first, vec![point]);

    let second = source
        .daily_closes("BTC-EUR", d(2024, 1, 6), d(2024, 1, 8))
        .await
        .unwrap_err();
    assert!(matches!(second, SyncError::Source { .. }), "{second}");

    let calls = source.calls().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].symbol, "BTC-USD");
    assert_eq!(calls[0].start, d(2024, 1, 6));
    assert_eq!(calls[0].end_exclusive, d(2024, 1, 8));
    assert_eq!(calls[1].symbol, "BTC-EUR");
}

#[tokio::test]
async fn scripted_source_without_queued_behavior_fails() {
    let source = ScriptedSource::new();
    let err = source
        .daily_closes("BTC-USD", d(2024, 1, 6), d(2024, 1, 8))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Source { .. }), "{err}");
}

#[test]
fn memory_store_tracks_existence_and_writes() {
    let store = MemoryStore::new();
    assert!(!store.exists());
    assert!(store.load().unwrap().is_empty());
    assert_eq!(store.write_count(), 0);

    let point = PricePoint::new(d(2024, 1, 6), Decimal::from(44_000));
    store.write_all(&[point]).unwrap();
    assert!(store.exists());
    assert_eq!(store.load().unwrap(), vec![point]);
    assert_eq!(store.write_count(), 1);
}

#[test]
fn seeded_memory_store_reports_existing_rows() {
    let point = PricePoint::new(d(2024, 1, 6), Decimal::from(44_000));
    let store = MemoryStore::seeded(vec![point]);
    assert!(store.exists());
    assert_eq!(store.snapshot(), vec![point]);
    assert_eq!(store.write_count(), 0);
}
