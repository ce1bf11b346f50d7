use btcsync_core::{PricePoint, merge_points};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // ~55 years of dates starting in 1999, plenty of collisions at this density.
    (0i32..20_000).prop_map(|d| NaiveDate::from_num_days_from_ce_opt(730_000 + d).unwrap())
}

fn arb_point() -> impl Strategy<Value = PricePoint> {
    (arb_date(), 0i64..10_000_000i64)
        .prop_map(|(d, cents)| PricePoint::new(d, Decimal::new(cents, 2)))
}

proptest! {
    #[test]
    fn first_wins_and_strictly_sorted(
        series in proptest::collection::vec(
            proptest::collection::vec(arb_point(), 0..40),
            0..5,
        )
    ) {
        let mut first_by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for s in &series {
            for p in s {
                first_by_date.entry(p.snapped_at).or_insert(p.price);
            }
        }

        let merged = merge_points(series);
        prop_assert_eq!(merged.len(), first_by_date.len());

        let mut prev: Option<NaiveDate> = None;
        for p in &merged {
            if let Some(prev) = prev {
                prop_assert!(prev < p.snapped_at);
            }
            prop_assert_eq!(first_by_date[&p.snapped_at], p.price);
            prev = Some(p.snapped_at);
        }
    }

    #[test]
    fn merging_merged_output_is_identity(
        points in proptest::collection::vec(arb_point(), 0..80)
    ) {
        let once = merge_points([points]);
        let twice = merge_points([once.clone()]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn higher_priority_series_survives_overlay(
        old in proptest::collection::vec(arb_point(), 0..60),
        new in proptest::collection::vec(arb_point(), 0..60),
    ) {
        let merged = merge_points([old.clone(), new]);
        let by_date: BTreeMap<_, _> = merged.iter().map(|p| (p.snapped_at, p.price)).collect();
        let mut seen = BTreeMap::new();
        for p in &old {
            seen.entry(p.snapped_at).or_insert(p.price);
        }
        for (date, price) in seen {
            prop_assert_eq!(by_date[&date], price);
        }
    }
}
