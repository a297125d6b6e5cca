//! Fetch command: resolve a calendar URL without the registry.

use chrono::Utc;

use roomboard_core::{RoomCalendarSource, resolve};
use roomboard_providers::CalendarFetcher;

use crate::cli::OutputArgs;
use crate::config::AppConfig;
use crate::error::CliResult;

/// Fetches `url`, resolves it and prints the result.
pub async fn run(
    config: &AppConfig,
    url: &str,
    username: &str,
    password: &str,
    output: &OutputArgs,
) -> CliResult<()> {
    let source = RoomCalendarSource::new(url, username, password);
    let now = output.at.unwrap_or_else(Utc::now);

    let result = match source.url() {
        Some(url) => {
            let fetcher = CalendarFetcher::new(config.fetcher_config()?)?;
            let events = fetcher
                .fetch(url, &source.username, &source.password, now)
                .await;
            resolve(events, now)
        }
        None => roomboard_core::OccupancyResult::free(),
    };

    super::check::print_occupancy(config, url, &result, now, output.json)
}
