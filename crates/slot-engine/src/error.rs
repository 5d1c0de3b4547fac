//! Error types for slot-engine operations.

use thiserror::Error;

use crate::event::Event;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    /// A range or duration argument was out of bounds (`days < 0`, `slot_duration <= 0`).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An input event broke the event contract. The whole computation fails.
    #[error("Malformed event {event}: {reason}")]
    MalformedEvent { event: Event, reason: String },

    /// The event store could not produce a snapshot.
    #[error("Event store error: {0}")]
    Store(String),
}

impl SlotError {
    pub(crate) fn malformed(event: &Event, reason: impl Into<String>) -> Self {
        SlotError::MalformedEvent {
            event: event.clone(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
