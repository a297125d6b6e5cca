//! Occupancy resolution.
//!
//! [`resolve`] turns an unordered, possibly overlapping set of events into
//! the answer a room display needs: is the room free right now, what is
//! running, what comes next and how long until the current booking ends.
//!
//! Resolution is a pure function of `(events, now)`; nothing is cached.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::CalendarEvent;
use crate::status::StatusToken;

/// The outcome of one resolution cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyResult {
    /// All events, ascending by start.
    pub events: Vec<CalendarEvent>,
    /// The event running now, if any. At most one even when bookings overlap.
    pub current_event: Option<CalendarEvent>,
    /// The first event starting after now.
    pub next_event: Option<CalendarEvent>,
    /// True when nothing is running.
    pub is_free: bool,
    /// Whole minutes until the current event ends, rounded down.
    ///
    /// May be negative when the end has already passed; clamping is left to
    /// presentation.
    pub remaining_minutes: Option<i64>,
}

impl OccupancyResult {
    /// The result for a room without a calendar: free, no events.
    pub fn free() -> Self {
        Self {
            is_free: true,
            ..Self::default()
        }
    }

    /// Returns the status token for this result.
    pub fn status(&self) -> StatusToken {
        StatusToken::for_occupancy(self.is_free)
    }

    /// Re-derives the remaining minutes of the current event against `now`.
    pub fn remaining_minutes_at(&self, now: DateTime<Utc>) -> Option<i64> {
        self.current_event
            .as_ref()
            .and_then(|event| event.date_to)
            .map(|end| minutes_until(end, now))
    }
}

/// Resolves occupancy for `events` at `now`.
pub fn resolve(mut events: Vec<CalendarEvent>, now: DateTime<Utc>) -> OccupancyResult {
    // Stable: equal starts keep feed order.
    events.sort_by(|a, b| compare_start(a.date_from, b.date_from));

    let current_event = events.iter().find(|e| e.is_active_at(now)).cloned();
    let next_event = events.iter().find(|e| e.starts_after(now)).cloned();
    let remaining_minutes = current_event
        .as_ref()
        .and_then(|e| e.date_to)
        .map(|end| minutes_until(end, now));

    OccupancyResult {
        is_free: current_event.is_none(),
        events,
        current_event,
        next_event,
        remaining_minutes,
    }
}

/// Orders starts ascending with unknown starts last.
fn compare_start(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Floor of `(end - now)` in minutes.
fn minutes_until(end: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (end - now).num_milliseconds().div_euclid(60_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 5, h, m, 0).unwrap()
    }

    fn event(name: &str, from: (u32, u32), to: (u32, u32)) -> CalendarEvent {
        CalendarEvent::new()
            .with_name(name)
            .with_span(at(from.0, from.1), at(to.0, to.1))
    }

    #[test]
    fn empty_is_free() {
        let result = resolve(Vec::new(), at(12, 0));
        assert!(result.is_free);
        assert!(result.current_event.is_none());
        assert!(result.next_event.is_none());
        assert!(result.remaining_minutes.is_none());
        assert_eq!(result.status(), StatusToken::Free);
    }

    #[test]
    fn single_running_event() {
        let result = resolve(vec![event("Sync", (9, 0), (10, 0))], at(9, 30));

        assert!(!result.is_free);
        assert_eq!(result.current_event.as_ref().unwrap().display_name(), "Sync");
        assert_eq!(result.remaining_minutes, Some(30));
        assert_eq!(result.status(), StatusToken::Busy);
    }

    #[test]
    fn remaining_minutes_round_down() {
        let now = at(9, 30) + Duration::seconds(59);
        let result = resolve(vec![event("Sync", (9, 0), (10, 0))], now);
        assert_eq!(result.remaining_minutes, Some(29));
    }

    #[test]
    fn remaining_minutes_can_be_negative() {
        let mut inverted = event("Odd", (9, 0), (10, 0));
        inverted.date_to = Some(at(9, 0) + Duration::seconds(-30));
        let result = OccupancyResult {
            current_event: Some(inverted),
            ..OccupancyResult::default()
        };
        assert_eq!(result.remaining_minutes_at(at(9, 0)), Some(-1));
    }

    #[test]
    fn overlaps_report_one_current_event() {
        let events = vec![
            event("Late", (9, 30), (11, 0)),
            event("Early", (9, 0), (10, 0)),
            event("Later", (9, 45), (10, 30)),
        ];
        let result = resolve(events, at(9, 50));

        assert_eq!(
            result.current_event.as_ref().unwrap().display_name(),
            "Early"
        );
        assert_eq!(result.remaining_minutes, Some(10));
        assert!(!result.is_free);
    }

    #[test]
    fn next_event_is_independent_of_current() {
        let events = vec![
            event("Long", (9, 0), (12, 0)),
            event("Overlap", (10, 0), (10, 30)),
        ];
        let result = resolve(events, at(9, 30));

        assert_eq!(result.current_event.unwrap().display_name(), "Long");
        assert_eq!(result.next_event.unwrap().display_name(), "Overlap");
    }

    #[test]
    fn next_event_starts_strictly_after_now() {
        let events = vec![event("Now", (10, 0), (11, 0)), event("Soon", (11, 0), (12, 0))];
        let result = resolve(events, at(10, 0));

        let next = result.next_event.unwrap();
        assert_eq!(next.display_name(), "Soon");
        assert!(next.date_from.unwrap() > at(10, 0));
    }

    #[test]
    fn sort_is_stable_with_unknown_starts_last() {
        let undated = CalendarEvent::new().with_name("Undated");
        let events = vec![
            undated.clone(),
            event("B", (11, 0), (12, 0)),
            event("A1", (9, 0), (9, 30)),
            event("A2", (9, 0), (9, 15)),
        ];
        let result = resolve(events, at(8, 0));

        let names: Vec<_> = result.events.iter().map(|e| e.display_name()).collect();
        assert_eq!(names, ["A1", "A2", "B", "Undated"]);
        assert_eq!(result.next_event.unwrap().display_name(), "A1");
    }

    #[test]
    fn undated_event_never_current() {
        let mut open_start = CalendarEvent::new().with_name("No start");
        open_start.date_to = Some(at(23, 0));
        let result = resolve(vec![open_start], at(12, 0));

        assert!(result.is_free);
        assert!(result.next_event.is_none());
    }

    #[test]
    fn is_free_mirrors_current_event() {
        let events = vec![event("A", (9, 0), (10, 0)), event("B", (13, 0), (14, 0))];
        for minute in (0..24 * 60).step_by(7) {
            let now = at(0, 0) + Duration::minutes(minute);
            let result = resolve(events.clone(), now);
            assert_eq!(result.is_free, result.current_event.is_none());
            if let Some(next) = &result.next_event {
                assert!(next.date_from.unwrap() > now);
            }
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let events = vec![event("A", (9, 0), (10, 0))];
        let now = at(9, 17);
        let first = resolve(events.clone(), now);
        let second = resolve(events, now);

        assert_eq!(first, second);
        assert_eq!(first.remaining_minutes_at(now), first.remaining_minutes);
        assert_eq!(first.remaining_minutes_at(now), Some(43));
    }

    #[test]
    fn free_result() {
        let result = OccupancyResult::free();
        assert!(result.is_free);
        assert!(result.events.is_empty());
        assert_eq!(result.remaining_minutes_at(at(0, 0)), None);
    }

    #[test]
    fn json_shape() {
        let result = resolve(vec![event("Sync", (9, 0), (10, 0))], at(9, 30));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["isFree"], false);
        assert_eq!(json["remainingMinutes"], 30);
        assert_eq!(json["currentEvent"]["name"], "Sync");
        assert!(json["nextEvent"].is_null());
        assert_eq!(json["events"].as_array().unwrap().len(), 1);
    }
}
