//! Calendar source of a room, as handed over by the room registry.

use serde::{Deserialize, Deserializer, Serialize};

/// Where a room's bookings live and how to authenticate against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomCalendarSource {
    /// `.ics` feed or CalDAV collection URL. Empty means "no calendar".
    #[serde(deserialize_with = "null_as_default")]
    pub caldav_url: String,
    /// Basic auth user name.
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    /// Basic auth password.
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
}

impl RoomCalendarSource {
    /// Creates a source for `url` with credentials.
    pub fn new(
        caldav_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            caldav_url: caldav_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the calendar URL, or `None` when the room has no calendar.
    pub fn url(&self) -> Option<&str> {
        let url = self.caldav_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

/// Reads an explicit `null` as the field's default.
///
/// Registry records are written by other tools, which store `null` for
/// fields the user cleared.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_url_means_no_calendar() {
        assert_eq!(RoomCalendarSource::default().url(), None);
        assert_eq!(RoomCalendarSource::new("  ", "u", "p").url(), None);
        assert_eq!(
            RoomCalendarSource::new("https://dav.example.com/cal/", "u", "p").url(),
            Some("https://dav.example.com/cal/")
        );
    }

    #[test]
    fn deserializes_registry_record() {
        let source: RoomCalendarSource =
            serde_json::from_str(r#"{"caldavUrl":"https://x/y.ics","username":"bob"}"#).unwrap();
        assert_eq!(source.url(), Some("https://x/y.ics"));
        assert_eq!(source.username, "bob");
        assert_eq!(source.password, "");
    }

    #[test]
    fn null_fields_are_empty() {
        let source: RoomCalendarSource =
            serde_json::from_str(r#"{"caldavUrl":null,"username":null,"password":"p"}"#)
                .unwrap();
        assert_eq!(source.url(), None);
        assert_eq!(source.username, "");
        assert_eq!(source.password, "p");
    }
}
