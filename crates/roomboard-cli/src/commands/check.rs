//! Check command: occupancy of one registered room.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use roomboard_core::{OccupancyResult, StatusToken, Zone, format_clock, format_remaining};
use roomboard_providers::CalendarFetcher;
use roomboard_server::{OccupancyEngine, RoomStore};

use crate::cli::OutputArgs;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// JSON form of a resolved occupancy, same shape as the HTTP API.
#[derive(Debug, Serialize)]
pub(crate) struct OccupancyReport<'a> {
    #[serde(flatten)]
    pub occupancy: &'a OccupancyResult,
    pub status: StatusToken,
    pub label: &'a str,
}

/// Resolves and prints the occupancy of `room_id`.
pub async fn run(
    config: &AppConfig,
    room_id: &str,
    rooms: Option<PathBuf>,
    output: &OutputArgs,
) -> CliResult<()> {
    let store = super::open_store(config, rooms);
    let room = store
        .get(room_id)?
        .ok_or_else(|| CliError::RoomNotFound(room_id.to_string()))?;

    let fetcher = CalendarFetcher::new(config.fetcher_config()?)?;
    let engine = OccupancyEngine::new(Arc::new(fetcher));
    let now = output.at.unwrap_or_else(Utc::now);
    let result = engine.occupancy(&room.source(), now).await;

    print_occupancy(config, &room.name, &result, now, output.json)
}

/// Prints `result` as text or JSON.
pub(crate) fn print_occupancy(
    config: &AppConfig,
    title: &str,
    result: &OccupancyResult,
    now: DateTime<Utc>,
    json: bool,
) -> CliResult<()> {
    if json {
        let status = result.status();
        let sync = config.status_sync()?;
        let report = OccupancyReport {
            occupancy: result,
            status,
            label: sync.label(status),
        };
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::config(format!("failed to serialize result: {}", e)))?;
        println!("{}", text);
    } else {
        print!("{}", render_occupancy(title, result, now, &config.zone()?));
    }
    Ok(())
}

/// Human-readable summary of an occupancy.
pub(crate) fn render_occupancy(
    title: &str,
    result: &OccupancyResult,
    now: DateTime<Utc>,
    zone: &Zone,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}: {}\n", title, result.status()));

    if let Some(current) = &result.current_event {
        let remaining = result
            .remaining_minutes_at(now)
            .map(format_remaining)
            .unwrap_or_default();
        out.push_str(&format!(
            "  now:  {} ({} - {}, {})\n",
            current.display_name(),
            format_clock(current.date_from, zone),
            format_clock(current.date_to, zone),
            remaining
        ));
    }
    if let Some(next) = &result.next_event {
        out.push_str(&format!(
            "  next: {} at {}\n",
            next.display_name(),
            format_clock(next.date_from, zone)
        ));
    }
    out.push_str(&format!("  {} event(s) today\n", result.events.len()));
    out
}
