//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use roomboard_core::StatusSync;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,

    /// Path to the room registry snapshot (`rooms.json`).
    pub rooms_path: PathBuf,

    /// How often the room view reloads itself.
    pub page_reload: Duration,

    /// Query parameter binding for the status signal.
    pub status: StatusSync,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], Self::DEFAULT_PORT)),
            rooms_path: PathBuf::from(Self::DEFAULT_ROOMS_PATH),
            page_reload: Duration::from_secs(Self::DEFAULT_PAGE_RELOAD_SECS),
            status: StatusSync::default(),
        }
    }
}

impl ServerConfig {
    /// Default listening port.
    pub const DEFAULT_PORT: u16 = 8085;

    /// Default registry path, relative to the working directory.
    pub const DEFAULT_ROOMS_PATH: &'static str = "rooms.json";

    /// Default room view reload interval in seconds.
    pub const DEFAULT_PAGE_RELOAD_SECS: u64 = 30;

    /// Creates a new server configuration listening on `bind`.
    pub fn new(bind: SocketAddr) -> Self {
        Self {
            bind,
            ..Default::default()
        }
    }

    /// Builder: set the room registry path.
    pub fn with_rooms_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rooms_path = path.into();
        self
    }

    /// Builder: set the room view reload interval.
    pub fn with_page_reload(mut self, interval: Duration) -> Self {
        self.page_reload = interval;
        self
    }

    /// Builder: set the status signal binding.
    pub fn with_status(mut self, status: StatusSync) -> Self {
        self.status = status;
        self
    }
}
