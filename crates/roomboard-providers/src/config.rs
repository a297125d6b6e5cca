//! Fetcher configuration.

use std::time::Duration;

use roomboard_core::Zone;

use crate::ics::{IcsOptions, UtcSuffix};

/// Configuration shared by every calendar fetch.
///
/// Credentials and URLs are per room and travel with each request; this only
/// holds the transport and interpretation settings.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Whether to verify TLS certificates.
    pub verify_tls: bool,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,

    /// How floating timestamps are read.
    pub ics: IcsOptions,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            verify_tls: true,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("roomboard/{}", env!("CARGO_PKG_VERSION")),
            ics: IcsOptions::default(),
        }
    }
}

impl FetcherConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables TLS verification (for self-signed calendar servers).
    pub fn with_insecure_tls(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the zone used for wall-clock values and the day window.
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.ics.zone = zone;
        self
    }

    /// Sets how a trailing `Z` on timestamps is treated.
    pub fn with_utc_suffix(mut self, utc_suffix: UtcSuffix) -> Self {
        self.ics.utc_suffix = utc_suffix;
        self
    }

    /// Returns the configured zone.
    pub fn zone(&self) -> &Zone {
        &self.ics.zone
    }
}
