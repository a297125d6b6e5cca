//! Occupancy engine: fetch, then resolve.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use roomboard_core::{OccupancyResult, RoomCalendarSource, resolve};
use roomboard_providers::{CalendarProvider, FetchRequest};

/// Computes a room's occupancy from its calendar source.
#[derive(Clone)]
pub struct OccupancyEngine {
    provider: Arc<dyn CalendarProvider>,
}

impl OccupancyEngine {
    /// Creates an engine fetching through `provider`.
    pub fn new(provider: Arc<dyn CalendarProvider>) -> Self {
        Self { provider }
    }

    /// Returns the provider name.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Resolves occupancy of `source` at `now`.
    ///
    /// A source without a URL is free and costs no network round trip.
    pub async fn occupancy(
        &self,
        source: &RoomCalendarSource,
        now: DateTime<Utc>,
    ) -> OccupancyResult {
        let Some(url) = source.url() else {
            debug!("Room has no calendar configured");
            return OccupancyResult::free();
        };

        let request =
            FetchRequest::new(url, now).with_credentials(&source.username, &source.password);
        let events = self.provider.fetch_events(request).await;
        resolve(events, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use roomboard_core::CalendarEvent;
    use roomboard_providers::StaticProvider;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 5, h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn missing_url_is_free_without_fetching() {
        let provider = Arc::new(StaticProvider::new(vec![
            CalendarEvent::default().with_span(at(9, 0), at(10, 0)),
        ]));
        let engine = OccupancyEngine::new(provider.clone());

        let result = engine
            .occupancy(&RoomCalendarSource::default(), at(9, 30))
            .await;

        assert_eq!(result, OccupancyResult::free());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn busy_during_a_booking() {
        let provider = Arc::new(StaticProvider::new(vec![
            CalendarEvent::default()
                .with_name("Review")
                .with_span(at(9, 0), at(10, 0)),
            CalendarEvent::default()
                .with_name("Lunch")
                .with_span(at(12, 0), at(13, 0)),
        ]));
        let engine = OccupancyEngine::new(provider.clone());
        let source = RoomCalendarSource::new("https://dav.example.com/cal/blue/", "blue", "pw");

        let result = engine.occupancy(&source, at(9, 30)).await;

        assert!(!result.is_free);
        assert_eq!(result.remaining_minutes, Some(30));
        assert_eq!(
            result.next_event.as_ref().map(|e| e.display_name()),
            Some("Lunch")
        );

        let request = provider.last_request().unwrap();
        assert_eq!(request.url, "https://dav.example.com/cal/blue/");
        assert_eq!(request.username, "blue");
        assert_eq!(request.password, "pw");
        assert_eq!(request.reference, at(9, 30));
        assert_eq!(engine.provider_name(), "static");
    }

    #[tokio::test]
    async fn empty_calendar_is_free() {
        let engine = OccupancyEngine::new(Arc::new(StaticProvider::default()));
        let source = RoomCalendarSource::new("https://dav.example.com/cal/blue/", "", "");

        let result = engine.occupancy(&source, at(9, 30)).await;

        assert!(result.is_free);
        assert!(result.current_event.is_none());
        assert!(result.events.is_empty());
    }
}
