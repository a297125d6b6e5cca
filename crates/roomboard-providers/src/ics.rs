//! Line-oriented iCalendar reader.
//!
//! Reads the subset of RFC 5545 a room display needs: `VEVENT` blocks with
//! `SUMMARY`, `DTSTART`, `DTEND`, `ORGANIZER` and `DESCRIPTION`. Text values
//! are passed through verbatim: backslash escapes are not decoded and folded
//! continuation lines are not joined. Nothing here fails; a bad date leaves
//! its field unset and a `VEVENT` without `END` is dropped.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use tracing::{debug, trace};

use roomboard_core::{CalendarEvent, Zone};

static ORGANIZER_CN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CN=([^;:]+)").expect("Invalid CN regex"));

/// How a trailing `Z` on a `YYYYMMDDTHHMMSSZ` value is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UtcSuffix {
    /// Read the value as wall-clock time in the room's zone regardless.
    #[default]
    Ignore,
    /// Read `Z`-suffixed values as UTC.
    Honor,
}

/// Interpretation settings for floating timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IcsOptions {
    /// Zone used for wall-clock values.
    pub zone: Zone,
    /// Treatment of the UTC designator.
    pub utc_suffix: UtcSuffix,
}

impl IcsOptions {
    /// Creates options for `zone` with the default suffix policy.
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            utc_suffix: UtcSuffix::default(),
        }
    }

    /// Builder method to set the suffix policy.
    pub fn with_utc_suffix(mut self, utc_suffix: UtcSuffix) -> Self {
        self.utc_suffix = utc_suffix;
        self
    }
}

/// Parses iCalendar text into events, in feed order.
pub fn parse_ics(raw: &str, options: &IcsOptions) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    let mut current: Option<CalendarEvent> = None;

    for line in raw.split('\n').map(str::trim) {
        if line == "BEGIN:VEVENT" {
            if current.is_some() {
                debug!("Discarding VEVENT without END");
            }
            current = Some(CalendarEvent::new());
            continue;
        }

        if line == "END:VEVENT" {
            if let Some(event) = current.take() {
                trace!(
                    name = ?event.name,
                    start = ?event.date_from,
                    end = ?event.date_to,
                    "Parsed event from ICS"
                );
                events.push(event);
            }
            continue;
        }

        if let Some(event) = current.as_mut() {
            apply_property(event, line, options);
        }
    }

    if current.is_some() {
        debug!("Dropping VEVENT left open at end of input");
    }

    events
}

/// Applies one content line to the event being built.
fn apply_property(event: &mut CalendarEvent, line: &str, options: &IcsOptions) {
    if let Some(summary) = line.strip_prefix("SUMMARY:") {
        event.name = Some(summary.to_string());
    } else if line.starts_with("DTSTART") {
        event.date_from = parse_ics_date(property_value(line), options);
    } else if line.starts_with("DTEND") {
        event.date_to = parse_ics_date(property_value(line), options);
    } else if line.starts_with("ORGANIZER") {
        if let Some(caps) = ORGANIZER_CN.captures(line) {
            event.organizer = Some(caps[1].to_string());
        }
    } else if let Some(description) = line.strip_prefix("DESCRIPTION:") {
        event.description = Some(description.to_string());
    }
}

/// The text after the last `:`; parameters before it are ignored.
fn property_value(line: &str) -> &str {
    line.rsplit(':').next().unwrap_or(line)
}

/// Parses an iCalendar date value.
///
/// Values of at least 15 characters are read positionally as
/// `YYYYMMDDTHHMMSS` with an optional trailing `Z`. Anything shorter goes
/// through [`parse_free_form`].
pub fn parse_ics_date(value: &str, options: &IcsOptions) -> Option<DateTime<Utc>> {
    if value.len() < 15 {
        return parse_free_form(value, &options.zone);
    }

    let naive = slice_basic_datetime(value)?;
    if value.ends_with('Z') && options.utc_suffix == UtcSuffix::Honor {
        return Some(naive.and_utc());
    }
    options.zone.localize(naive)
}

/// Slices `YYYYMMDDTHHMMSS` by fixed offsets. The separator at index 8 is
/// not checked.
fn slice_basic_datetime(value: &str) -> Option<NaiveDateTime> {
    let year = value.get(0..4)?;
    let month = value.get(4..6)?;
    let day = value.get(6..8)?;
    let hour = value.get(9..11)?;
    let minute = value.get(11..13)?;
    let second = value.get(13..15)?;

    let assembled = format!("{year}-{month}-{day}T{hour}:{minute}:{second}");
    NaiveDateTime::parse_from_str(&assembled, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Best-effort parsing for values that are not basic-format datetimes.
///
/// Date-only values are read as local midnight.
fn parse_free_form(value: &str, zone: &Zone) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.to_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.to_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return zone.localize(naive);
        }
    }
    for format in ["%Y-%m-%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return zone.localize(date.and_time(NaiveTime::MIN));
        }
    }

    debug!(value = %value, "Unparseable ICS date");
    None
}
