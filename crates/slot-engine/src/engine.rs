//! Slot computation: partition openings into fixed windows, drop the ones that
//! collide with appointments.
//!
//! Each opening `[start, end)` is walked in steps of the slot duration. A
//! candidate `[t, t + d)` is emitted only when `t + d <= end`, so a slot flush
//! with the end of the opening is kept and a slot that would spill past it is
//! discarded rather than truncated. A candidate is then rejected outright if
//! any appointment on the same day overlaps it (half-open, see
//! [`crate::overlap`]); no partial slots are carved out.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::error::{Result, SlotError};
use crate::event::{AvailableSlot, Event, EventKind};
use crate::overlap::overlaps;
use crate::store::EventStore;

/// Computes bookable slots over the events of an [`EventStore`].
///
/// The engine holds no state besides its store; every call works on a fresh
/// snapshot returned by [`EventStore::query`].
#[derive(Debug, Clone)]
pub struct SlotEngine<S> {
    store: S,
}

impl<S: EventStore> SlotEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Compute the available slots for `days` days starting at `range_start`.
    ///
    /// # Arguments
    ///
    /// * `range_start` — First day of the range.
    /// * `days` — Number of days after `range_start` to include (inclusive, `0` = one day).
    /// * `slot_duration` — Length of every generated slot.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidArgument` for `days < 0` or a duration that
    /// is not at least one second, `SlotError::MalformedEvent` if any fetched
    /// event breaks the event contract, and any `SlotError::Store` raised by
    /// the store.
    pub fn compute_available_slots(
        &self,
        range_start: NaiveDate,
        days: i64,
        slot_duration: Duration,
    ) -> Result<Vec<AvailableSlot>> {
        check_slot_duration(slot_duration)?;
        if days < 0 {
            return Err(SlotError::InvalidArgument(format!(
                "days must be non-negative, got {}",
                days
            )));
        }

        let events = self.store.query(range_start, days)?;
        tracing::debug!(
            %range_start,
            days,
            slot_minutes = slot_duration.num_minutes(),
            events = events.len(),
            "computing available slots"
        );

        find_available_slots(&events, slot_duration)
    }
}

/// Openings and appointments that share a calendar day.
#[derive(Debug, Default)]
struct DaySchedule<'a> {
    openings: Vec<&'a Event>,
    appointments: Vec<&'a Event>,
}

/// Compute available slots over an already-fetched event snapshot.
///
/// Input order does not matter. Output is sorted by `(day, start_time)`.
///
/// # Errors
/// Returns `SlotError::InvalidArgument` if `slot_duration` is shorter than
/// one second and `SlotError::MalformedEvent` if any event is invalid (see
/// [`validate_events`]).
pub fn find_available_slots(events: &[Event], slot_duration: Duration) -> Result<Vec<AvailableSlot>> {
    check_slot_duration(slot_duration)?;
    let schedule = schedule_by_day(events)?;

    let mut sequence = 0u64;
    let mut available = Vec::new();

    for (day, entry) in &schedule {
        for opening in &entry.openings {
            for slot in partition_opening(opening, slot_duration, &mut sequence) {
                match entry.appointments.iter().find(|a| overlaps(&slot, **a)) {
                    Some(appointment) => {
                        tracing::trace!(
                            %day,
                            sequence = slot.sequence,
                            slot = %slot,
                            appointment = %appointment,
                            "dropped slot overlapping appointment"
                        );
                    }
                    None => available.push(slot),
                }
            }
        }
    }

    available.sort_by_key(|s| (s.day, s.start_time));

    tracing::debug!(
        days = schedule.len(),
        candidates = sequence,
        available = available.len(),
        "slot computation finished"
    );

    Ok(available)
}

/// Check every event against the input contract without computing slots.
///
/// # Errors
/// Returns `SlotError::MalformedEvent` for the first event with an empty or
/// inverted interval, an input of kind `AvailableSlot`, or an opening that
/// overlaps another opening on the same day.
pub fn validate_events(events: &[Event]) -> Result<()> {
    schedule_by_day(events).map(|_| ())
}

fn check_slot_duration(slot_duration: Duration) -> Result<()> {
    if slot_duration <= Duration::zero() {
        return Err(SlotError::InvalidArgument(format!(
            "slot duration must be positive, got {} seconds",
            slot_duration.num_seconds()
        )));
    }
    // At most 86 400 candidates per opening.
    if slot_duration < Duration::seconds(1) {
        return Err(SlotError::InvalidArgument(format!(
            "slot duration must be at least one second, got {} nanoseconds",
            slot_duration.num_nanoseconds().unwrap_or_default()
        )));
    }
    Ok(())
}

/// Validate and group events by day, openings sorted by start time.
fn schedule_by_day(events: &[Event]) -> Result<BTreeMap<NaiveDate, DaySchedule<'_>>> {
    let mut schedule: BTreeMap<NaiveDate, DaySchedule<'_>> = BTreeMap::new();

    for event in events {
        event.validate()?;
        let entry = schedule.entry(event.day).or_default();
        match event.kind {
            EventKind::Opening => entry.openings.push(event),
            EventKind::Appointment => entry.appointments.push(event),
            // Rejected by `validate` above.
            EventKind::AvailableSlot => {}
        }
    }

    for entry in schedule.values_mut() {
        entry.openings.sort_by_key(|e| (e.start_time, e.end_time));
        // Sorted by start: any overlapping pair implies an overlapping neighbour pair.
        if let Some(pair) = entry
            .openings
            .windows(2)
            .find(|pair| pair[1].start_time < pair[0].end_time)
        {
            return Err(SlotError::malformed(
                pair[1],
                format!("overlaps opening {} on the same day", pair[0]),
            ));
        }
    }

    Ok(schedule)
}

/// Split one opening into consecutive candidate slots of `slot_duration`.
///
/// `next_sequence` is shared across openings so candidate numbers keep
/// increasing through a whole computation.
fn partition_opening(
    opening: &Event,
    slot_duration: Duration,
    next_sequence: &mut u64,
) -> Vec<AvailableSlot> {
    let mut slots = Vec::new();
    let mut cursor = opening.start_time;

    loop {
        let (slot_end, wrapped_secs) = cursor.overflowing_add_signed(slot_duration);
        if wrapped_secs != 0 || slot_end > opening.end_time {
            break;
        }

        *next_sequence += 1;
        let slot = AvailableSlot::candidate(opening.day, cursor, slot_end, *next_sequence);
        tracing::trace!(sequence = slot.sequence, slot = %slot, "added candidate slot");
        slots.push(slot);

        cursor = slot_end;
    }

    slots
}
