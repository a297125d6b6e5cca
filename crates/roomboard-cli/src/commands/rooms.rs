//! Rooms command: list the registry.

use std::path::PathBuf;

use roomboard_server::{RoomStore, RoomSummary};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Prints the registered rooms.
pub fn run(config: &AppConfig, rooms: Option<PathBuf>, json: bool) -> CliResult<()> {
    let store = super::open_store(config, rooms);
    let summaries: Vec<RoomSummary> = store.list()?.iter().map(|r| r.summary()).collect();

    if json {
        let text = serde_json::to_string_pretty(&summaries)
            .map_err(|e| CliError::config(format!("failed to serialize rooms: {}", e)))?;
        println!("{}", text);
    } else if summaries.is_empty() {
        println!("No rooms in {}", store.path().display());
    } else {
        print!("{}", render_table(&summaries));
    }
    Ok(())
}

fn render_table(rooms: &[RoomSummary]) -> String {
    let width = rooms.iter().map(|r| r.id.len()).max().unwrap_or(0).max(2);
    let mut out = String::new();
    for room in rooms {
        let calendar = if room.has_calendar {
            room.caldav_url.as_str()
        } else {
            "(no calendar)"
        };
        out.push_str(&format!("{:<width$}  {}  {}\n", room.id, room.name, calendar));
    }
    out
}
