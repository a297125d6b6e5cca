//! Calendar ingestion for roomboard.
//!
//! - [`CalendarProvider`] - the seam the occupancy engine calls through
//! - [`CalendarFetcher`] - the HTTP(S) implementation (`.ics` GET, CalDAV REPORT)
//! - [`parse_ics`] - line-oriented `VEVENT` reader
//! - [`ProviderError`] - errors on the degraded paths, logged and never returned
//!
//! ```text
//!   .ics feed ──GET──┐
//!                    ├──► parse_ics ──► Vec<CalendarEvent>
//!   CalDAV ──REPORT──┘    (per calendar-data blob)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use roomboard_providers::{CalendarFetcher, FetcherConfig};
//!
//! let fetcher = CalendarFetcher::new(FetcherConfig::new())?;
//! let events = fetcher.fetch(url, "room", "secret", chrono::Utc::now()).await;
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod ics;
pub mod provider;
pub mod xml;

pub use client::CalendarClient;
pub use config::FetcherConfig;
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use fetcher::CalendarFetcher;
pub use ics::{IcsOptions, UtcSuffix, parse_ics, parse_ics_date};
pub use provider::{BoxFuture, CalendarProvider, FetchRequest, StaticProvider};
