//! Calendar event type.
//!
//! [`CalendarEvent`] is one diary entry as read from an iCalendar feed. Every
//! field is optional because feeds in the wild routinely omit things; the
//! occupancy resolver decides what an incomplete event means.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title shown for events that carry no `SUMMARY`.
pub const DEFAULT_EVENT_NAME: &str = "Event";

/// A single calendar entry.
///
/// Instants are stored in UTC; conversion to the room's wall clock happens
/// at parse time and again at presentation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Display title, raw from the feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// When the event starts.
    pub date_from: Option<DateTime<Utc>>,

    /// When the event ends. Expected, but not required, to follow `date_from`.
    pub date_to: Option<DateTime<Utc>>,

    /// Organizer display name (the `CN` parameter, not an address).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,

    /// Free text, preserved but not interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Creates an empty event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the title, falling back to [`DEFAULT_EVENT_NAME`].
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_EVENT_NAME)
    }

    /// Returns true if the event is running at `now`.
    ///
    /// Both bounds must be known; the interval is half-open.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => from <= now && now < to,
            _ => false,
        }
    }

    /// Returns true if the event starts strictly after `now`.
    pub fn starts_after(&self, now: DateTime<Utc>) -> bool {
        self.date_from.is_some_and(|from| from > now)
    }

    /// Builder method to set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to set both bounds.
    pub fn with_span(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Builder method to set the start only.
    pub fn with_start(mut self, from: DateTime<Utc>) -> Self {
        self.date_from = Some(from);
        self
    }

    /// Builder method to set the organizer.
    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
