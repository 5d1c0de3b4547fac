//! # slot-engine
//!
//! Deterministic availability-slot computation for booking calendars.
//!
//! Given a day-scoped list of *openings* (windows when slots may be offered)
//! and *appointments* (already-booked intervals), the engine splits every
//! opening into fixed-duration candidate slots and drops each candidate that
//! overlaps an appointment on the same day. Computation is pure and
//! synchronous; the only I/O boundary is the [`EventStore`] it reads from.
//!
//! ## Modules
//!
//! - [`event`] — `Event`, `EventKind`, `AvailableSlot`
//! - [`store`] — `EventStore` trait and the copy-on-write in-memory store
//! - [`overlap`] — Half-open interval overlap detection
//! - [`engine`] — Slot partitioning and appointment exclusion
//! - [`sample`] — A demo calendar
//! - [`error`] — Error types

pub mod engine;
pub mod error;
pub mod event;
pub mod overlap;
pub mod sample;
pub mod store;

pub use engine::{find_available_slots, validate_events, SlotEngine};
pub use error::SlotError;
pub use event::{AvailableSlot, Event, EventKind};
pub use overlap::{find_overlaps, overlaps};
pub use store::{EventStore, InMemoryEventStore};
