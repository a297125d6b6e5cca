//! Minimal HTML room view.
//!
//! The page is what a wall-mounted display shows: room name, free/busy,
//! time left and today's bookings. It reloads itself so the status check
//! (and any redirect it triggers) runs again.

use std::time::Duration;

use roomboard_core::{
    CalendarEvent, OccupancyResult, Zone, format_clock, format_remaining, html_escape,
};

use crate::store::RoomRecord;

/// Renders the room page.
pub fn render_room(
    room: &RoomRecord,
    result: &OccupancyResult,
    zone: &Zone,
    reload: Duration,
) -> String {
    let status = result.status();
    let title = html_escape(&room.name);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<meta http-equiv=\"refresh\" content=\"{}\">\n",
        reload.as_secs().max(1)
    ));
    html.push_str(&format!("<title>{}</title>\n</head>\n", title));

    match &room.background {
        Some(background) => html.push_str(&format!(
            "<body class=\"{}\" style=\"background-image: url('{}')\">\n",
            status,
            html_escape(background)
        )),
        None => html.push_str(&format!("<body class=\"{}\">\n", status)),
    }

    html.push_str(&format!("<h1>{}</h1>\n", title));
    let label = if result.is_free { "Free" } else { "Busy" };
    html.push_str(&format!("<p class=\"status\">{}</p>\n", label));
    if let Some(minutes) = result.remaining_minutes {
        html.push_str(&format!(
            "<p class=\"remaining\">{}</p>\n",
            format_remaining(minutes)
        ));
    }
    if let Some(current) = &result.current_event {
        html.push_str(&current_panel(current, zone));
    }

    html.push_str("<ul class=\"events\">\n");
    for event in &result.events {
        let current = result.current_event.as_ref() == Some(event);
        html.push_str(&format!(
            "<li{}><span class=\"time\">{}</span> <span class=\"name\">{}</span></li>\n",
            if current { " class=\"current\"" } else { "" },
            time_span(event, zone),
            html_escape(event.display_name())
        ));
    }
    html.push_str("</ul>\n");

    if let Some(footer) = footer(result, zone) {
        html.push_str(&format!("<footer>{}</footer>\n", footer));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Time span and organizer of the running booking.
fn current_panel(current: &CalendarEvent, zone: &Zone) -> String {
    let mut panel = format!("<p class=\"span\">{}</p>\n", time_span(current, zone));
    if let Some(organizer) = current.organizer.as_deref().filter(|o| !o.is_empty()) {
        panel.push_str(&format!(
            "<p class=\"organizer\">Organizer: {}</p>\n",
            html_escape(organizer)
        ));
    }
    panel
}

fn time_span(event: &CalendarEvent, zone: &Zone) -> String {
    format!(
        "{} - {}",
        format_clock(event.date_from, zone),
        format_clock(event.date_to, zone)
    )
}

/// Footer line: the running booking, or else the next one. Escaped.
fn footer(result: &OccupancyResult, zone: &Zone) -> Option<String> {
    match (&result.current_event, &result.next_event) {
        (Some(current), _) => Some(html_escape(current.display_name())),
        (None, Some(next)) => Some(next_line(next, zone)),
        (None, None) => None,
    }
}

fn next_line(next: &CalendarEvent, zone: &Zone) -> String {
    format!(
        "Next: {} at {}",
        html_escape(next.display_name()),
        format_clock(next.date_from, zone)
    )
}
