//! The [`CalendarProvider`] seam between the occupancy engine and calendar
//! backends.
//!
//! A provider is total: whatever goes wrong upstream, it answers with a list
//! of events (possibly empty). Failures are reported through `tracing`, not
//! through the return type, so a room display never stalls on a flaky
//! calendar server.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};

use roomboard_core::CalendarEvent;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so providers can sit behind
/// `Arc<dyn CalendarProvider>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One room's calendar fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Calendar source URL (`.ics` feed or CalDAV collection).
    pub url: String,
    /// Basic auth user name.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// Instant whose day is queried.
    pub reference: DateTime<Utc>,
}

impl FetchRequest {
    /// Creates a request without credentials.
    pub fn new(url: impl Into<String>, reference: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            username: String::new(),
            password: String::new(),
            reference,
        }
    }

    /// Builder method to set credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }
}

/// A source of calendar events for a room.
///
/// # Example Implementation
///
/// ```ignore
/// impl CalendarProvider for Fixture {
///     fn name(&self) -> &str { "fixture" }
///
///     fn fetch_events(&self, _request: FetchRequest) -> BoxFuture<'_, Vec<CalendarEvent>> {
///         let events = self.events.clone();
///         Box::pin(async move { events })
///     }
/// }
/// ```
pub trait CalendarProvider: Send + Sync {
    /// Returns the name/type of this provider (e.g., "caldav", "static").
    fn name(&self) -> &str;

    /// Fetches the events relevant to the request's day.
    ///
    /// Never fails: unreachable sources, error statuses and unparseable
    /// payloads all yield an empty list.
    fn fetch_events(&self, request: FetchRequest) -> BoxFuture<'_, Vec<CalendarEvent>>;
}

/// A provider that serves a fixed event list and records what it was asked.
///
/// Used for demos and tests of code sitting above the provider seam.
#[derive(Debug, Default)]
pub struct StaticProvider {
    events: Vec<CalendarEvent>,
    calls: AtomicUsize,
    last_request: Mutex<Option<FetchRequest>>,
}

impl StaticProvider {
    /// Creates a provider serving `events`.
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    /// Number of fetches served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<FetchRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

impl CalendarProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_events(&self, request: FetchRequest) -> BoxFuture<'_, Vec<CalendarEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }
        let events = self.events.clone();
        Box::pin(async move { events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn request_builder() {
        let reference = Utc.with_ymd_and_hms(2025, 2, 5, 9, 0, 0).unwrap();
        let request = FetchRequest::new("https://cal.example.com/room.ics", reference)
            .with_credentials("room", "secret");

        assert_eq!(request.url, "https://cal.example.com/room.ics");
        assert_eq!(request.username, "room");
        assert_eq!(request.password, "secret");
        assert_eq!(request.reference, reference);
    }

    #[tokio::test]
    async fn static_provider_records_calls() {
        let reference = Utc.with_ymd_and_hms(2025, 2, 5, 9, 0, 0).unwrap();
        let provider = StaticProvider::new(vec![CalendarEvent::default().with_name("Standup")]);
        assert_eq!(provider.calls(), 0);
        assert!(provider.last_request().is_none());

        let events = provider
            .fetch_events(FetchRequest::new("https://x/room.ics", reference))
            .await;

        assert_eq!(events.len(), 1);
        assert_eq!(provider.calls(), 1);
        assert_eq!(provider.name(), "static");
        assert_eq!(
            provider.last_request().map(|r| r.url),
            Some("https://x/room.ics".to_string())
        );
    }

    #[test]
    fn provider_is_object_safe() {
        let provider: Box<dyn CalendarProvider> = Box::new(StaticProvider::default());
        assert_eq!(provider.name(), "static");
    }
}
