//! Tests for event store range queries and snapshot publishing.

use std::sync::Arc;
use std::thread;

use chrono::{Duration, NaiveDate, NaiveTime};
use slot_engine::store::{events_in_range, range_end};
use slot_engine::{Event, EventStore, InMemoryEventStore, SlotEngine, SlotError};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
}

fn opening_on(d: u32) -> Event {
    Event::opening(
        date(d),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    )
}

#[test]
fn query_includes_both_range_ends() {
    let store = InMemoryEventStore::new((14..=24).map(opening_on).collect());

    let found = store.query(date(16), 5).unwrap();
    let mut days: Vec<NaiveDate> = found.iter().map(|e| e.day).collect();
    days.sort();
    assert_eq!(days, (16..=21).map(date).collect::<Vec<_>>());
}

#[test]
fn zero_days_selects_single_day() {
    let store = InMemoryEventStore::new(vec![opening_on(15), opening_on(16), opening_on(17)]);
    let found = store.query(date(16), 0).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].day, date(16));
}

#[test]
fn negative_days_rejected() {
    let store = InMemoryEventStore::default();
    let err = store.query(date(16), -3).unwrap_err();
    assert_eq!(
        err,
        SlotError::InvalidArgument("days must be non-negative, got -3".to_string())
    );
}

#[test]
fn range_end_past_calendar_limit_rejected() {
    assert!(matches!(
        range_end(NaiveDate::MAX, 1),
        Err(SlotError::InvalidArgument(_))
    ));
    assert_eq!(range_end(date(30), 1).unwrap(), NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
}

#[test]
fn slice_store_matches_in_memory_store() {
    let events: Vec<Event> = (10..=20).map(opening_on).collect();
    let store = InMemoryEventStore::new(events.clone());

    assert_eq!(
        events_in_range(&events, date(12), 3).unwrap(),
        store.query(date(12), 3).unwrap()
    );
    assert_eq!(events.as_slice().query(date(12), 3).unwrap().len(), 4);
}

#[test]
fn earlier_snapshot_unaffected_by_push() {
    let store = InMemoryEventStore::new(vec![opening_on(16)]);
    let before = store.snapshot();

    store.push(opening_on(17));

    assert_eq!(before.len(), 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn replace_swaps_whole_list() {
    let store = InMemoryEventStore::new(vec![opening_on(16), opening_on(17)]);
    store.replace(vec![]);
    assert!(store.is_empty());
    assert!(store.query(date(16), 7).unwrap().is_empty());
}

#[test]
fn concurrent_readers_see_complete_snapshots() {
    let store = Arc::new(InMemoryEventStore::new(vec![opening_on(16)]));
    let engine = Arc::new(SlotEngine::new(Arc::clone(&store)));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..50 {
                    let slots = engine
                        .compute_available_slots(date(16), 7, Duration::minutes(30))
                        .unwrap();
                    // Each opening contributes exactly two slots.
                    assert_eq!(slots.len() % 2, 0);
                    assert!(!slots.is_empty());
                }
            })
        })
        .collect();

    for d in 17..=22 {
        store.push(opening_on(d));
    }

    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(store.len(), 7);
}
