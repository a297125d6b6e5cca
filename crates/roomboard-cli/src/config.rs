//! Application configuration.
//!
//! All settings live in a single `config.toml`, by default at
//! `~/.config/roomboard/config.toml`. Every key is optional.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8085"
//! rooms_path = "/var/lib/roomboard/rooms.json"
//! page_reload_secs = 30
//!
//! [calendar]
//! timeout_secs = 10
//! verify_tls = true
//! honor_utc_suffix = false
//! timezone = "Europe/Moscow"
//!
//! [status]
//! param = "rmspanel"
//! free = "green"
//! busy = "red"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use roomboard_core::{StatusSync, Zone};
use roomboard_providers::{FetcherConfig, UtcSuffix};
use roomboard_server::ServerConfig;

use crate::error::{CliError, CliResult};

/// Configuration for the roomboard binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerSettings,

    /// Calendar fetch settings.
    pub calendar: CalendarSettings,

    /// Status signal settings.
    pub status: StatusSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Listen address.
    pub bind: String,

    /// Room registry file.
    pub rooms_path: PathBuf,

    /// Room view reload interval in seconds.
    pub page_reload_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: format!("0.0.0.0:{}", ServerConfig::DEFAULT_PORT),
            rooms_path: PathBuf::from(ServerConfig::DEFAULT_ROOMS_PATH),
            page_reload_secs: ServerConfig::DEFAULT_PAGE_RELOAD_SECS,
        }
    }
}

/// Calendar fetch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Whether to verify TLS certificates.
    pub verify_tls: bool,

    /// Read `...Z` timestamps as UTC instead of wall-clock time.
    pub honor_utc_suffix: bool,

    /// IANA zone for wall-clock timestamps. Empty means the host zone.
    pub timezone: String,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timeout_secs: FetcherConfig::DEFAULT_TIMEOUT_SECS,
            verify_tls: true,
            honor_utc_suffix: false,
            timezone: String::new(),
        }
    }
}

/// Status signal settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSettings {
    /// Query parameter carrying the label.
    pub param: String,

    /// Label for a free room.
    pub free: String,

    /// Label for a busy room.
    pub busy: String,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            param: StatusSync::DEFAULT_PARAM.to_string(),
            free: StatusSync::DEFAULT_FREE_LABEL.to_string(),
            busy: StatusSync::DEFAULT_BUSY_LABEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the default path, or defaults if absent.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roomboard")
            .join("config.toml")
    }

    /// Resolves the configured zone.
    pub fn zone(&self) -> CliResult<Zone> {
        Zone::parse(&self.calendar.timezone).map_err(|e| CliError::config(e.to_string()))
    }

    /// Builds the fetcher configuration.
    pub fn fetcher_config(&self) -> CliResult<FetcherConfig> {
        if self.calendar.timeout_secs == 0 {
            return Err(CliError::config("calendar timeout_secs must be at least 1"));
        }
        let mut config = FetcherConfig::new()
            .with_timeout(Duration::from_secs(self.calendar.timeout_secs))
            .with_zone(self.zone()?);
        if !self.calendar.verify_tls {
            config = config.with_insecure_tls();
        }
        if self.calendar.honor_utc_suffix {
            config = config.with_utc_suffix(UtcSuffix::Honor);
        }
        Ok(config)
    }

    /// Builds the status signal binding.
    pub fn status_sync(&self) -> CliResult<StatusSync> {
        let status = &self.status;
        if status.param.trim().is_empty() {
            return Err(CliError::config("status param must not be empty"));
        }
        if status.free == status.busy {
            return Err(CliError::config(format!(
                "status labels must differ (both are {:?})",
                status.free
            )));
        }
        Ok(StatusSync::new(&status.param, &status.free, &status.busy))
    }

    /// Builds the server configuration.
    pub fn server_config(&self) -> CliResult<ServerConfig> {
        let bind: SocketAddr = self.server.bind.parse().map_err(|e| {
            CliError::config(format!("invalid bind address {:?}: {}", self.server.bind, e))
        })?;
        Ok(ServerConfig::new(bind)
            .with_rooms_path(&self.server.rooms_path)
            .with_page_reload(Duration::from_secs(self.server.page_reload_secs))
            .with_status(self.status_sync()?))
    }

    /// Checks every derived setting.
    pub fn validate(&self) -> CliResult<()> {
        self.server_config()?;
        self.fetcher_config()?;
        Ok(())
    }
}
