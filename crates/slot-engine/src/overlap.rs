//! Half-open interval overlap between same-day events and slots.
//!
//! Two intervals `[a0, a1)` and `[b0, b1)` on the same day overlap iff
//! `a0 < b1 && b0 < a1`. Touching endpoints (one ends exactly when the other
//! starts) are NOT overlaps.

use chrono::{NaiveDate, NaiveTime};

use crate::event::{AvailableSlot, Event};

/// Anything that occupies a time-of-day interval on one calendar day.
pub trait DayInterval {
    fn day(&self) -> NaiveDate;
    fn start_time(&self) -> NaiveTime;
    fn end_time(&self) -> NaiveTime;
}

impl DayInterval for Event {
    fn day(&self) -> NaiveDate {
        self.day
    }
    fn start_time(&self) -> NaiveTime {
        self.start_time
    }
    fn end_time(&self) -> NaiveTime {
        self.end_time
    }
}

impl DayInterval for AvailableSlot {
    fn day(&self) -> NaiveDate {
        self.day
    }
    fn start_time(&self) -> NaiveTime {
        self.start_time
    }
    fn end_time(&self) -> NaiveTime {
        self.end_time
    }
}

/// A detected overlap between a slot and an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub slot: AvailableSlot,
    pub event: Event,
    pub overlap_minutes: i64,
}

/// True when both intervals are on the same day and each starts before the
/// other ends.
pub fn overlaps<A: DayInterval + ?Sized, B: DayInterval + ?Sized>(a: &A, b: &B) -> bool {
    a.day() == b.day() && a.start_time() < b.end_time() && b.start_time() < a.end_time()
}

/// Find every (slot, event) pair that overlaps.
///
/// The overlap duration is `min(ends) - max(starts)`. Pairs on different
/// days never overlap.
pub fn find_overlaps(slots: &[AvailableSlot], events: &[Event]) -> Vec<Overlap> {
    let mut found = Vec::new();

    for slot in slots {
        for event in events {
            if overlaps(slot, event) {
                let overlap_start = slot.start_time.max(event.start_time);
                let overlap_end = slot.end_time.min(event.end_time);

                found.push(Overlap {
                    slot: slot.clone(),
                    event: event.clone(),
                    overlap_minutes: (overlap_end - overlap_start).num_minutes(),
                });
            }
        }
    }

    found
}
