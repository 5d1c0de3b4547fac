//! A small demo calendar for trying the engine without an event source.
//!
//! Covers three days in September 2025: two openings with three appointments
//! on the 16th, two openings around one appointment on the 17th, and a single
//! unbooked opening on the 21st.

use chrono::{NaiveDate, NaiveTime};

use crate::event::Event;

/// First day covered by [`sample_events`].
pub fn sample_start() -> NaiveDate {
    date(16)
}

/// The demo calendar, in no particular order.
pub fn sample_events() -> Vec<Event> {
    vec![
        // 3 hours, two appointments inside.
        Event::opening(date(16), time(9, 0), time(12, 0)).with_notes("Sample opening slot"),
        Event::appointment(date(16), time(10, 0), time(10, 30))
            .with_notes("Sample appointment slot #overlaps"),
        Event::appointment(date(16), time(11, 0), time(11, 30))
            .with_notes("Sample appointment slot #overlaps"),
        Event::opening(date(16), time(14, 0), time(18, 0)).with_notes("Sample opening slot"),
        Event::appointment(date(16), time(15, 0), time(16, 0)).with_notes("Sample appointment slot"),
        // Appointment sits between the two openings, touching both.
        Event::opening(date(17), time(16, 0), time(16, 30)).with_notes("Sample opening slot"),
        Event::appointment(date(17), time(16, 30), time(17, 0)).with_notes("Sample appointment slot"),
        // 1h10m leaves a 10 minute tail.
        Event::opening(date(17), time(17, 0), time(18, 10)).with_notes("Sample opening slot"),
        Event::opening(date(21), time(9, 0), time(12, 0)).with_notes("Sample opening slot"),
    ]
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, day).expect("valid sample date")
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid sample time")
}
