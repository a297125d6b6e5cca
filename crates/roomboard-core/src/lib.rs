//! Core types: events, time zones, occupancy resolution, status tokens

pub mod event;
pub mod format;
pub mod occupancy;
pub mod room;
pub mod status;
pub mod time;
pub mod tracing;

pub use event::{CalendarEvent, DEFAULT_EVENT_NAME};
pub use format::{format_clock, format_remaining, html_escape};
pub use occupancy::{OccupancyResult, resolve};
pub use room::{RoomCalendarSource, null_as_default};
pub use status::{StatusSync, StatusToken, SyncDecision};
pub use time::{TimeWindow, Zone, ZoneError};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
