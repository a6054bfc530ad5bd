//! Property-based tests for the reagent inventory core.
//!
//! These tests use proptest to check the classification, search and ingestion
//! invariants over a wide range of inputs.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use reagent_inventory::{
    seed::demo_records,
    services::{
        expiry::{classify, days_until, ExpiryClassifier, ExpiryStatus},
        ingest::{ReagentInput, RecordIngestor},
        reagent_store::{IdPolicy, ReagentStore},
    },
    ReagentRecord,
};

// Strategies for generating test data
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..40_000)
        .prop_map(|offset| NaiveDate::from_ymd_opt(1950, 1, 1).unwrap() + Duration::days(offset))
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Zа-яА-Я0-9 ]{1,24}"
}

fn record(id: u64, name: String) -> ReagentRecord {
    let mut record = demo_records().remove(0);
    record.id = id;
    record.name = name;
    record
}

// Property: the three statuses partition the day axis at 0 and 30
proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn past_dates_are_expired(today in date_strategy(), back in 1i64..10_000) {
        prop_assert_eq!(classify(today - Duration::days(back), today), ExpiryStatus::Expired);
    }

    #[test]
    fn dates_within_window_are_expiring_soon(today in date_strategy(), ahead in 0i64..=30) {
        prop_assert_eq!(classify(today + Duration::days(ahead), today), ExpiryStatus::ExpiringSoon);
    }

    #[test]
    fn dates_beyond_window_are_normal(today in date_strategy(), ahead in 31i64..10_000) {
        prop_assert_eq!(classify(today + Duration::days(ahead), today), ExpiryStatus::Normal);
    }

    #[test]
    fn classification_agrees_with_days_until(
        today in date_strategy(),
        expiry in date_strategy(),
        window in 0u32..400,
    ) {
        let days = days_until(expiry, today);
        let expected = if days < 0 {
            ExpiryStatus::Expired
        } else if days <= i64::from(window) {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Normal
        };
        prop_assert_eq!(ExpiryClassifier::new(window).classify(expiry, today), expected);
    }
}

// Property: search keeps insertion order and ignores case
proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn empty_search_returns_everything_in_order(names in prop::collection::vec(name_strategy(), 0..30)) {
        let mut store = ReagentStore::new();
        for (i, name) in names.iter().enumerate() {
            store.add(record(i as u64 + 1, name.clone()));
        }
        let found: Vec<&str> = store.filter("").map(|r| r.name.as_str()).collect();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn search_ignores_case(name in name_strategy()) {
        let mut store = ReagentStore::new();
        store.add(record(1, name.clone()));
        prop_assert_eq!(store.filter(&name.to_uppercase()).count(), 1);
        prop_assert_eq!(store.filter(&name.to_lowercase()).count(), 1);
    }

    #[test]
    fn filtered_records_keep_insertion_order(
        names in prop::collection::vec(name_strategy(), 0..20),
        term in "[a-zа-я]{0,2}",
    ) {
        let mut store = ReagentStore::new();
        for (i, name) in names.iter().enumerate() {
            store.add(record(i as u64 + 1, name.clone()));
        }
        let ids: Vec<u64> = store.filter(&term).map(|r| r.id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(ids.len() <= store.len());
    }
}

// Property: ingestion never fails and always yields a usable quantity
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn numeric_quantities_are_kept(quantity in any::<u32>()) {
        let input = ReagentInput {
            name: "Ацетон".into(),
            quantity: quantity.to_string(),
            ..Default::default()
        };
        let outcome = RecordIngestor::new().ingest(1, &input);
        prop_assert_eq!(outcome.record.quantity, quantity);
        prop_assert!(outcome.is_clean());
    }

    #[test]
    fn non_numeric_quantities_become_zero(raw in "[a-zA-Zа-я][a-zA-Z0-9 ]{0,10}") {
        let input = ReagentInput {
            name: "Ацетон".into(),
            quantity: raw,
            ..Default::default()
        };
        let outcome = RecordIngestor::new().ingest(1, &input);
        prop_assert_eq!(outcome.record.quantity, 0);
        prop_assert!(!outcome.is_clean());
    }

    #[test]
    fn arbitrary_text_never_panics(raw in "\\PC{0,16}") {
        let input = ReagentInput {
            name: raw.clone(),
            quantity: raw.clone(),
            expiry_date: raw,
            ..Default::default()
        };
        let _ = RecordIngestor::new().ingest(1, &input);
    }

    #[test]
    fn count_plus_one_ids_are_sequential(n in 1usize..50) {
        let ingestor = RecordIngestor::new();
        let mut store = ReagentStore::with_policy(IdPolicy::CountPlusOne);
        let ids: Vec<u64> = (0..n)
            .map(|_| ingestor.ingest_into(&mut store, &ReagentInput::default()).record.id)
            .collect();
        prop_assert_eq!(ids, (1..=n as u64).collect::<Vec<_>>());
    }
}
