//! `slots` CLI — compute bookable slots from a calendar of openings and appointments.
//!
//! ## Usage
//!
//! ```sh
//! # Compute 30-minute slots for the week starting 2025-09-16 (events on stdin)
//! cat events.json | slots compute --from 2025-09-16
//!
//! # 45-minute slots for a single day, as JSON, from a file
//! slots compute -i events.json --from 2025-09-16 --days 0 --duration 45 --format json
//!
//! # Run against the built-in demo calendar
//! slots sample
//!
//! # Check an event file without computing anything
//! slots validate -i events.json
//! ```
//!
//! Every flag can also be set through its `SLOTS_*` environment variable.
//! Diagnostics go to stderr and are filtered by `RUST_LOG`.

use std::collections::BTreeMap;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use slot_engine::{AvailableSlot, Event, InMemoryEventStore, SlotEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Compute bookable calendar slots from openings and appointments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute available slots from a JSON event list
    Compute {
        /// Input file with a JSON array of events (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First day of the range (defaults to today)
        #[arg(long, env = "SLOTS_FROM", value_parser = parse_day)]
        from: Option<NaiveDate>,
        #[command(flatten)]
        options: SlotOptions,
    },
    /// Compute available slots over the built-in demo calendar
    Sample {
        /// First day of the range (defaults to the first sample day)
        #[arg(long, env = "SLOTS_FROM", value_parser = parse_day)]
        from: Option<NaiveDate>,
        #[command(flatten)]
        options: SlotOptions,
    },
    /// Check a JSON event list for malformed events
    Validate {
        /// Input file with a JSON array of events (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Args)]
struct SlotOptions {
    /// Days after --from to include (0 = only that day)
    #[arg(long, env = "SLOTS_DAYS", default_value_t = 7, allow_negative_numbers = true)]
    days: i64,
    /// Slot length in minutes
    #[arg(
        long,
        env = "SLOTS_DURATION_MINUTES",
        default_value_t = 30,
        allow_negative_numbers = true
    )]
    duration: i64,
    /// Output format
    #[arg(long, env = "SLOTS_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per day: `day: 2025-09-16 => 09:00:00-09:30:00,...`
    Text,
    /// Pretty-printed JSON array of slots
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compute {
            input,
            from,
            options,
        } => {
            let events = read_events(input.as_deref())?;
            let from = from.unwrap_or_else(|| Local::now().date_naive());
            run(events, from, &options)?;
        }
        Commands::Sample { from, options } => {
            let from = from.unwrap_or_else(slot_engine::sample::sample_start);
            run(slot_engine::sample::sample_events(), from, &options)?;
        }
        Commands::Validate { input } => {
            let events = read_events(input.as_deref())?;
            slot_engine::validate_events(&events).context("Event list is invalid")?;
            println!("OK: {} events valid", events.len());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "slots=debug,slot_engine=debug"
    } else {
        "slots=info,slot_engine=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(events: Vec<Event>, from: NaiveDate, options: &SlotOptions) -> Result<()> {
    let Some(slot_duration) = Duration::try_minutes(options.duration) else {
        bail!(
            "Slot duration of {} minutes is out of range",
            options.duration
        );
    };

    let engine = SlotEngine::new(InMemoryEventStore::new(events));
    let slots = engine
        .compute_available_slots(from, options.days, slot_duration)
        .context("Failed to compute available slots")?;

    tracing::info!(
        %from,
        days = options.days,
        duration_minutes = options.duration,
        slots = slots.len(),
        "computed available slots"
    );

    let rendered = match options.format {
        OutputFormat::Text => render_text(&slots),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&slots).context("Failed to serialize slots")? + "\n"
        }
    };
    write_output(options.output.as_deref(), &rendered)
}

/// Group slots by day, one line per day, in day order.
fn render_text(slots: &[AvailableSlot]) -> String {
    if slots.is_empty() {
        return "No available slots.\n".to_string();
    }

    let mut by_day: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for slot in slots {
        by_day.entry(slot.day).or_default().push(slot.to_string());
    }

    by_day
        .iter()
        .map(|(day, ranges)| format!("day: {} => {}\n", day.format("%Y-%m-%d"), ranges.join(",")))
        .collect()
}

/// Accept `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS`.
/// Timestamps are truncated to their calendar day.
fn parse_day(raw: &str) -> std::result::Result<NaiveDate, String> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts.date());
    }
    Err(format!(
        "invalid date '{}': expected YYYY-MM-DD or an RFC 3339 timestamp",
        raw
    ))
}

fn read_events(path: Option<&str>) -> Result<Vec<Event>> {
    let json = read_input(path)?;
    let events: Vec<Event> =
        serde_json::from_str(&json).context("Failed to parse events JSON")?;
    tracing::info!(count = events.len(), "loaded events");
    Ok(events)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
