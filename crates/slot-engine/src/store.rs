//! Event storage boundary.
//!
//! The engine reads events only through [`EventStore::query`]. Stores may do
//! I/O; the in-memory store here hands out immutable snapshots so concurrent
//! readers never see a half-written list.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{Days, NaiveDate};

use crate::error::{Result, SlotError};
use crate::event::Event;

/// Read access to a flat list of calendar events.
pub trait EventStore {
    /// Return every event with `range_start <= day <= range_start + days`.
    ///
    /// Ordering is not guaranteed.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidArgument` if `days < 0` and
    /// `SlotError::Store` if the backing source cannot be read.
    fn query(&self, range_start: NaiveDate, days: i64) -> Result<Vec<Event>>;
}

impl<S: EventStore + ?Sized> EventStore for &S {
    fn query(&self, range_start: NaiveDate, days: i64) -> Result<Vec<Event>> {
        (**self).query(range_start, days)
    }
}

impl<S: EventStore + ?Sized> EventStore for Arc<S> {
    fn query(&self, range_start: NaiveDate, days: i64) -> Result<Vec<Event>> {
        (**self).query(range_start, days)
    }
}

impl EventStore for [Event] {
    fn query(&self, range_start: NaiveDate, days: i64) -> Result<Vec<Event>> {
        events_in_range(self, range_start, days)
    }
}

impl EventStore for Vec<Event> {
    fn query(&self, range_start: NaiveDate, days: i64) -> Result<Vec<Event>> {
        events_in_range(self, range_start, days)
    }
}

/// Resolve the inclusive last day of a `(range_start, days)` query.
pub fn range_end(range_start: NaiveDate, days: i64) -> Result<NaiveDate> {
    let offset = u64::try_from(days).map_err(|_| {
        SlotError::InvalidArgument(format!("days must be non-negative, got {}", days))
    })?;
    range_start.checked_add_days(Days::new(offset)).ok_or_else(|| {
        SlotError::InvalidArgument(format!(
            "range of {} days from {} exceeds the supported calendar",
            days, range_start
        ))
    })
}

/// Filter `events` down to those whose day falls inside the query range.
pub fn events_in_range(events: &[Event], range_start: NaiveDate, days: i64) -> Result<Vec<Event>> {
    let last_day = range_end(range_start, days)?;

    Ok(events
        .iter()
        .filter(|e| e.day >= range_start && e.day <= last_day)
        .cloned()
        .collect())
}

/// An event store held in memory, published as copy-on-write snapshots.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    snapshot: RwLock<Arc<Vec<Event>>>,
}

impl InMemoryEventStore {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(events)),
        }
    }

    /// The current snapshot. Later writes never mutate a returned snapshot.
    pub fn snapshot(&self) -> Arc<Vec<Event>> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Append an event, publishing a new snapshot.
    pub fn push(&self, event: Event) {
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(&mut guard).push(event);
    }

    /// Swap in an entirely new event list.
    pub fn replace(&self, events: Vec<Event>) {
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(events);
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl From<Vec<Event>> for InMemoryEventStore {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}

impl EventStore for InMemoryEventStore {
    fn query(&self, range_start: NaiveDate, days: i64) -> Result<Vec<Event>> {
        let snapshot = self.snapshot();
        let events = events_in_range(&snapshot, range_start, days)?;
        tracing::debug!(
            %range_start,
            days,
            total = snapshot.len(),
            matched = events.len(),
            "queried in-memory event store"
        );
        Ok(events)
    }
}
