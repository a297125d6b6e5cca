//! Room registry.
//!
//! The server only reads the registry. Records are created and edited
//! elsewhere, so [`JsonFileStore`] reloads the file on every call and each
//! request sees whatever was last written.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use roomboard_core::{RoomCalendarSource, null_as_default};

use crate::error::{ServerError, ServerResult};

/// One room as stored in the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomRecord {
    /// Room identifier, also the key in `rooms.json`.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Calendar URL (`.ics` feed or CalDAV collection). May be empty.
    #[serde(deserialize_with = "null_as_default")]
    pub caldav_url: String,
    /// Calendar user name.
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    /// Calendar password.
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
    /// Background image reference, if one was uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Creation timestamp as written by the registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl RoomRecord {
    /// Creates a record without a calendar.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: attach a calendar source.
    pub fn with_calendar(mut self, source: RoomCalendarSource) -> Self {
        self.caldav_url = source.caldav_url;
        self.username = source.username;
        self.password = source.password;
        self
    }

    /// Returns the calendar source of this room.
    pub fn source(&self) -> RoomCalendarSource {
        RoomCalendarSource::new(&self.caldav_url, &self.username, &self.password)
    }

    /// Returns the public view of this record.
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            caldav_url: self.caldav_url.clone(),
            has_calendar: self.source().url().is_some(),
            background: self.background.clone(),
        }
    }
}

/// A room as exposed over the API, without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub caldav_url: String,
    pub has_calendar: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// Read access to the room registry.
pub trait RoomStore: Send + Sync {
    /// Looks up a room by id.
    fn get(&self, id: &str) -> ServerResult<Option<RoomRecord>>;

    /// Lists all rooms, ordered by id.
    fn list(&self) -> ServerResult<Vec<RoomRecord>>;
}

/// Registry backed by a `rooms.json` file: an object keyed by room id.
///
/// A missing file is an empty registry. A file that does not parse is an
/// error.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the registry path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ServerResult<BTreeMap<String, RoomRecord>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Room registry not found, treating as empty");
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(ServerError::store(&self.path, e.to_string())),
        };

        let mut rooms: BTreeMap<String, RoomRecord> = serde_json::from_str(&content)
            .map_err(|e| ServerError::store(&self.path, e.to_string()))?;

        for (key, room) in rooms.iter_mut() {
            if room.id.is_empty() {
                room.id = key.clone();
            }
        }
        Ok(rooms)
    }
}

impl RoomStore for JsonFileStore {
    fn get(&self, id: &str) -> ServerResult<Option<RoomRecord>> {
        Ok(self.load()?.remove(id))
    }

    fn list(&self) -> ServerResult<Vec<RoomRecord>> {
        Ok(self.load()?.into_values().collect())
    }
}

/// In-memory registry, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rooms: BTreeMap<String, RoomRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a room, replacing any with the same id.
    pub fn with_room(mut self, room: RoomRecord) -> Self {
        self.rooms.insert(room.id.clone(), room);
        self
    }
}

impl RoomStore for MemoryStore {
    fn get(&self, id: &str) -> ServerResult<Option<RoomRecord>> {
        Ok(self.rooms.get(id).cloned())
    }

    fn list(&self) -> ServerResult<Vec<RoomRecord>> {
        Ok(self.rooms.values().cloned().collect())
    }
}
