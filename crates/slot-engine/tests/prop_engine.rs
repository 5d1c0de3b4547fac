//! Property-based tests for slot computation using proptest.
//!
//! These check invariants that must hold for any valid calendar, not just the
//! hand-picked cases in `engine_tests.rs`.

use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;
use slot_engine::{find_available_slots, overlaps, Event, EventKind, SlotEngine};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn minute_of_day(m: u32) -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(m * 60, 0).unwrap()
}

/// Day offset within a small range so events share days often.
fn arb_day() -> impl Strategy<Value = NaiveDate> {
    (0i64..4).prop_map(|offset| base_day() + Duration::days(offset))
}

/// A valid `[start, end)` interval in whole minutes.
fn arb_interval() -> impl Strategy<Value = (NaiveTime, NaiveTime)> {
    (0u32..1439)
        .prop_flat_map(|start| (Just(start), (start + 1)..1440))
        .prop_map(|(s, e)| (minute_of_day(s), minute_of_day(e)))
}

fn arb_appointment() -> impl Strategy<Value = Event> {
    (arb_day(), arb_interval()).prop_map(|(day, (s, e))| Event::appointment(day, s, e))
}

/// Non-overlapping openings: one sorted, disjoint set of cut points per day.
fn arb_openings() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((arb_day(), prop::collection::btree_set(0u32..1440, 0..8)), 0..4)
        .prop_map(|days| {
            let mut seen = std::collections::BTreeSet::new();
            let mut openings = Vec::new();
            for (day, cuts) in days {
                if !seen.insert(day) {
                    continue;
                }
                let cuts: Vec<u32> = cuts.into_iter().collect();
                for pair in cuts.chunks_exact(2) {
                    openings.push(Event::opening(
                        day,
                        minute_of_day(pair[0]),
                        minute_of_day(pair[1]),
                    ));
                }
            }
            openings
        })
}

fn arb_calendar() -> impl Strategy<Value = Vec<Event>> {
    (arb_openings(), prop::collection::vec(arb_appointment(), 0..10)).prop_map(
        |(mut openings, appointments)| {
            openings.extend(appointments);
            openings
        },
    )
}

fn arb_duration() -> impl Strategy<Value = Duration> {
    (1i64..=180).prop_map(Duration::minutes)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn every_slot_has_exact_duration(events in arb_calendar(), d in arb_duration()) {
        let slots = find_available_slots(&events, d).unwrap();
        for slot in &slots {
            prop_assert_eq!(slot.duration(), d);
        }
    }

    #[test]
    fn every_slot_lies_inside_a_same_day_opening(events in arb_calendar(), d in arb_duration()) {
        let slots = find_available_slots(&events, d).unwrap();
        for slot in &slots {
            let contained = events.iter().any(|e| {
                e.kind == EventKind::Opening
                    && e.day == slot.day
                    && e.start_time <= slot.start_time
                    && slot.end_time <= e.end_time
            });
            prop_assert!(contained, "slot {} on {} has no enclosing opening", slot, slot.day);
        }
    }

    #[test]
    fn no_slot_overlaps_an_appointment(events in arb_calendar(), d in arb_duration()) {
        let slots = find_available_slots(&events, d).unwrap();
        for slot in &slots {
            for e in events.iter().filter(|e| e.kind == EventKind::Appointment) {
                prop_assert!(!overlaps(slot, e), "slot {} overlaps {}", slot, e);
            }
        }
    }

    #[test]
    fn output_sorted_and_disjoint(events in arb_calendar(), d in arb_duration()) {
        let slots = find_available_slots(&events, d).unwrap();
        for pair in slots.windows(2) {
            prop_assert!((pair[0].day, pair[0].start_time) < (pair[1].day, pair[1].start_time));
            if pair[0].day == pair[1].day {
                prop_assert!(pair[0].end_time <= pair[1].start_time);
            }
        }
    }

    #[test]
    fn input_order_does_not_change_output(events in arb_calendar(), d in arb_duration()) {
        let forward = find_available_slots(&events, d).unwrap();
        let mut reversed_events = events.clone();
        reversed_events.reverse();
        let reversed = find_available_slots(&reversed_events, d).unwrap();
        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn repeated_computation_is_identical(events in arb_calendar(), d in arb_duration()) {
        let engine = SlotEngine::new(events);
        let a = engine.compute_available_slots(base_day(), 7, d).unwrap();
        let b = engine.compute_available_slots(base_day(), 7, d).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn days_without_openings_contribute_nothing(
        appointments in prop::collection::vec(arb_appointment(), 0..10),
        d in arb_duration(),
    ) {
        prop_assert!(find_available_slots(&appointments, d).unwrap().is_empty());
    }

    #[test]
    fn unbooked_opening_yields_floor_of_length_over_duration(
        (s, e) in arb_interval(),
        d in arb_duration(),
    ) {
        let opening = Event::opening(base_day(), s, e);
        let slots = find_available_slots(&[opening], d).unwrap();
        let expected = (e - s).num_minutes() / d.num_minutes();
        prop_assert_eq!(slots.len() as i64, expected);
    }
}
