//! Time helpers: the room's wall-clock [`Zone`] and query [`TimeWindow`]s.
//!
//! Feeds carry floating wall-clock timestamps (`20250205T100000`) that only
//! become instants once a zone is chosen. By default that is the zone of the
//! host, as reported by the operating system; a deployment may pin a named
//! IANA zone instead so that the display does not depend on how the host is
//! configured.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a zone name cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time zone: {0}")]
pub struct ZoneError(pub String);

/// The wall-clock zone used to interpret floating timestamps and day bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Zone {
    /// The host's local zone.
    #[default]
    System,
    /// A fixed IANA zone.
    Named(Tz),
}

impl Zone {
    /// Resolves a zone name. `""`, `"local"` and `"system"` select the host zone.
    pub fn parse(name: &str) -> Result<Self, ZoneError> {
        let trimmed = name.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("local")
            || trimmed.eq_ignore_ascii_case("system")
        {
            return Ok(Self::System);
        }
        trimmed
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| ZoneError(trimmed.to_string()))
    }

    /// Converts a wall-clock time in this zone to an instant.
    ///
    /// Ambiguous times (DST fold) resolve to the earlier instant. Times that
    /// fall into a DST gap do not exist and yield `None`.
    pub fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::System => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Returns the wall-clock reading of `instant` in this zone.
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::System => instant.with_timezone(&Local).naive_local(),
            Self::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// Returns the instant of local midnight on the day containing `instant`.
    pub fn start_of_day(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let midnight = self.wall_clock(instant).date().and_time(NaiveTime::MIN);
        // A handful of zones skip midnight on DST change days.
        self.localize(midnight)
            .or_else(|| self.localize(midnight + Duration::hours(1)))
            .unwrap_or_else(|| midnight.and_utc())
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "local"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

impl FromStr for Zone {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A time window for querying calendar events.
///
/// Represents a half-open interval `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// The day containing `reference`: local midnight plus 24 hours.
    pub fn day_of(reference: DateTime<Utc>, zone: &Zone) -> Self {
        let start = zone.start_of_day(reference);
        Self::new(start, start + Duration::hours(24))
    }

    /// Returns the duration of this time window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if a datetime falls within this window.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }
}
