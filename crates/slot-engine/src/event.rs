//! Calendar event model: openings, appointments, and generated slots.
//!
//! Every event lives on a single calendar day and covers the half-open
//! time-of-day interval `[start_time, end_time)`. The day is a
//! [`NaiveDate`], so any time-of-day component of a source timestamp is
//! dropped before an event is built.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// The closed set of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A window during which slots may be offered.
    Opening,
    /// An already-booked interval that excludes overlapping slots.
    Appointment,
    /// A bookable slot produced by the engine. Never valid as input.
    AvailableSlot,
}

impl EventKind {
    /// Three-letter tag used in the compact `Display` form.
    pub fn abbreviation(self) -> &'static str {
        match self {
            EventKind::Opening => "Ope",
            EventKind::Appointment => "App",
            EventKind::AvailableSlot => "Ava",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Opening => "Opening",
            EventKind::Appointment => "Appointment",
            EventKind::AvailableSlot => "AvailableSlot",
        };
        f.write_str(name)
    }
}

/// A scheduled interval on a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub day: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kind: EventKind,
    /// Free-text annotation. Carries no meaning for slot computation.
    #[serde(default)]
    pub notes: String,
}

impl Event {
    pub fn new(day: NaiveDate, start_time: NaiveTime, end_time: NaiveTime, kind: EventKind) -> Self {
        Self {
            day,
            start_time,
            end_time,
            kind,
            notes: String::new(),
        }
    }

    /// An opening window on `day`.
    pub fn opening(day: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self::new(day, start_time, end_time, EventKind::Opening)
    }

    /// A booked appointment on `day`.
    pub fn appointment(day: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self::new(day, start_time, end_time, EventKind::Appointment)
    }

    /// Build an event from a timestamp, truncating it to its calendar day.
    pub fn on(
        timestamp: NaiveDateTime,
        start_time: NaiveTime,
        end_time: NaiveTime,
        kind: EventKind,
    ) -> Self {
        Self::new(timestamp.date(), start_time, end_time, kind)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Check the input contract for events handed to the engine.
    ///
    /// # Errors
    /// Returns `SlotError::MalformedEvent` when the interval is empty or
    /// inverted (including windows that wrap past midnight), or when the
    /// event is an `AvailableSlot`, which only the engine may produce.
    pub fn validate(&self) -> Result<()> {
        if self.kind == EventKind::AvailableSlot {
            return Err(SlotError::malformed(
                self,
                "available slots are engine output and cannot be supplied as input",
            ));
        }
        if self.start_time == self.end_time {
            return Err(SlotError::malformed(self, "zero-length interval"));
        }
        if self.start_time > self.end_time {
            return Err(SlotError::malformed(
                self,
                "end time precedes start time (intervals crossing midnight are not supported)",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - [{}] {}-{}",
            self.kind.abbreviation(),
            self.day.format("%Y-%m-%d"),
            self.start_time,
            self.end_time
        )
    }
}

/// A fixed-duration bookable slot carved out of an opening.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub day: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Candidate number assigned during generation. Diagnostic only.
    pub sequence: u64,
    pub notes: String,
}

impl AvailableSlot {
    pub(crate) fn candidate(
        day: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        sequence: u64,
    ) -> Self {
        Self {
            day,
            start_time,
            end_time,
            sequence,
            notes: format!("Available slot #{}", sequence),
        }
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

impl From<AvailableSlot> for Event {
    fn from(slot: AvailableSlot) -> Self {
        Event {
            day: slot.day,
            start_time: slot.start_time,
            end_time: slot.end_time,
            kind: EventKind::AvailableSlot,
            notes: slot.notes,
        }
    }
}

impl fmt::Display for AvailableSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_time, self.end_time)
    }
}
