//! Presentation helpers shared by the HTTP view and the CLI.

use chrono::{DateTime, Utc};

use crate::time::Zone;

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Formats an optional instant as `HH:MM` on the room's wall clock.
pub fn format_clock(instant: Option<DateTime<Utc>>, zone: &Zone) -> String {
    match instant {
        Some(dt) => zone.wall_clock(dt).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// Formats remaining minutes, clamping overdue values.
pub fn format_remaining(minutes: i64) -> String {
    if minutes < 0 {
        "ending now".to_string()
    } else {
        format!("{} min", minutes)
    }
}
