//! Subcommand implementations.

pub mod check;
pub mod config;
pub mod fetch;
pub mod rooms;
pub mod serve;

use std::path::PathBuf;

use roomboard_server::JsonFileStore;

use crate::config::AppConfig;

/// Opens the registry, preferring a path given on the command line.
pub(crate) fn open_store(config: &AppConfig, rooms: Option<PathBuf>) -> JsonFileStore {
    JsonFileStore::new(rooms.unwrap_or_else(|| config.server.rooms_path.clone()))
}
