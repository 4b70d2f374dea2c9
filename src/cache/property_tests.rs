//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check upsert, lookup and listing behaviour of the media store.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::MediaStore;
use crate::graph::MediaRecord;

// == Strategies ==
/// Generates short media ids so batches collide often
fn id_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,2}"
}

fn media_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("IMAGE".to_string()),
        Just("VIDEO".to_string()),
        Just("CAROUSEL_ALBUM".to_string()),
    ]
}

/// Generates ISO-8601 timestamps across a few years
fn timestamp_strategy() -> impl Strategy<Value = String> {
    (2020u32..2026, 1u32..13, 1u32..29, 0u32..24)
        .prop_map(|(y, m, d, h)| format!("{y:04}-{m:02}-{d:02}T{h:02}:00:00+0000"))
}

fn media_strategy() -> impl Strategy<Value = MediaRecord> {
    (id_strategy(), media_type_strategy(), timestamp_strategy(), "[a-z ]{0,20}").prop_map(
        |(id, media_type, timestamp, caption)| MediaRecord {
            permalink: format!("https://instagram.com/p/{id}"),
            id,
            caption,
            media_type,
            media_url: "https://example.com/image.jpg".to_string(),
            timestamp,
        },
    )
}

fn sorted(mut records: Vec<MediaRecord>) -> Vec<MediaRecord> {
    records.sort_by(|a, b| a.id.cmp(&b.id));
    records
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Applying the same batch twice yields the same contents as applying it once.
    #[test]
    fn prop_upsert_idempotent(batch in prop::collection::vec(media_strategy(), 0..60)) {
        let mut once = MediaStore::new();
        once.upsert_all(batch.clone());

        let mut twice = MediaStore::new();
        twice.upsert_all(batch.clone());
        twice.upsert_all(batch);

        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(sorted(once.get_all()), sorted(twice.get_all()));
    }

    // The store holds exactly one record per distinct id, and the last write wins.
    #[test]
    fn prop_one_record_per_id(batch in prop::collection::vec(media_strategy(), 1..60)) {
        let mut store = MediaStore::new();
        store.upsert_all(batch.clone());

        let distinct: HashSet<&str> = batch.iter().map(|m| m.id.as_str()).collect();
        prop_assert_eq!(store.len(), distinct.len());

        for id in distinct {
            let last = batch.iter().rev().find(|m| m.id == id).unwrap();
            let stored = store.get_by_ids(&[id.to_string()]);
            prop_assert_eq!(&stored[0], last);
        }
    }

    // Listed ids come newest first, respect the filter and the limit.
    #[test]
    fn prop_list_ids_sorted_filtered_limited(
        batch in prop::collection::vec(media_strategy(), 0..60),
        media_type in prop_oneof![Just(String::new()), media_type_strategy()],
        limit in 0usize..10,
    ) {
        let mut store = MediaStore::new();
        store.upsert_all(batch);

        let ids = store.list_ids(limit, Some(&media_type));
        let records = store.get_by_ids(&ids);
        prop_assert_eq!(records.len(), ids.len());

        for pair in records.windows(2) {
            prop_assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        if !media_type.is_empty() {
            prop_assert!(records.iter().all(|m| m.media_type == media_type));
        }

        let matching = store
            .get_all()
            .iter()
            .filter(|m| media_type.is_empty() || m.media_type == media_type)
            .count();
        let expected = if limit > 0 { matching.min(limit) } else { matching };
        prop_assert_eq!(ids.len(), expected);
    }

    // `has_all` reports exactly the ids that `get_by_ids` cannot return.
    #[test]
    fn prop_has_all_matches_lookup(
        batch in prop::collection::vec(media_strategy(), 0..30),
        query in prop::collection::vec(id_strategy(), 0..10),
    ) {
        let mut store = MediaStore::new();
        store.upsert_all(batch);

        let (all_present, missing) = store.has_all(&query);
        let found = store.get_by_ids(&query);

        prop_assert_eq!(all_present, missing.is_empty());
        prop_assert_eq!(found.len() + missing.len(), query.len());
        for id in &missing {
            prop_assert!(store.get_by_ids(&[id.clone()]).is_empty());
        }
    }
}
