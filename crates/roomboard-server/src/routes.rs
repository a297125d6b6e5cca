//! HTTP routes.
//!
//! | route | answer |
//! |---|---|
//! | `GET /health` | `ok` |
//! | `GET /api/rooms` | room summaries, no credentials |
//! | `GET /api/rooms/{id}/events` | occupancy plus status token |
//! | `GET /room/{id}` | status-synchronised HTML view |
//! | `GET /` | redirect to `/api/rooms` |

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use roomboard_core::{OccupancyResult, StatusSync, StatusToken, SyncDecision, Zone};

use crate::engine::OccupancyEngine;
use crate::error::{ServerError, ServerResult};
use crate::store::{RoomRecord, RoomStore, RoomSummary};
use crate::view::render_room;

/// Source of "now" for a request.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// State shared by all handlers. Holds only immutable collaborators.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RoomStore>,
    engine: OccupancyEngine,
    status: StatusSync,
    zone: Zone,
    page_reload: Duration,
    clock: Clock,
}

impl AppState {
    /// Creates state with default status labels, the host zone and the
    /// system clock.
    pub fn new(store: Arc<dyn RoomStore>, engine: OccupancyEngine) -> Self {
        Self {
            store,
            engine,
            status: StatusSync::default(),
            zone: Zone::System,
            page_reload: Duration::from_secs(30),
            clock: Arc::new(Utc::now),
        }
    }

    /// Builder: set the status signal binding.
    pub fn with_status(mut self, status: StatusSync) -> Self {
        self.status = status;
        self
    }

    /// Builder: set the zone used for displayed times.
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Builder: set the room view reload interval.
    pub fn with_page_reload(mut self, interval: Duration) -> Self {
        self.page_reload = interval;
        self
    }

    /// Builder: replace the clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Registry reads touch the disk, so they run on the blocking pool.
    async fn room(&self, id: &str) -> ServerResult<Option<RoomRecord>> {
        let store = Arc::clone(&self.store);
        let id = id.to_string();
        tokio::task::spawn_blocking(move || store.get(&id)).await?
    }

    async fn rooms(&self) -> ServerResult<Vec<RoomRecord>> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.list()).await?
    }

    async fn occupancy(&self, room: &RoomRecord) -> OccupancyResult {
        let now = (self.clock)();
        self.engine.occupancy(&room.source(), now).await
    }
}

/// Builds the router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/{id}/events", get(room_events))
        .route("/room/{id}", get(room_view))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error answer of the JSON API.
#[derive(Debug)]
enum ApiError {
    RoomNotFound,
    Store(ServerError),
}

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::RoomNotFound => (StatusCode::NOT_FOUND, "room not found".to_string()),
            Self::Store(err) => {
                error!(error = %err, "Room registry unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Body of `GET /api/rooms/{id}/events`.
#[derive(Debug, Serialize)]
struct RoomEvents {
    #[serde(flatten)]
    occupancy: OccupancyResult,
    status: StatusToken,
}

async fn index() -> Redirect {
    Redirect::to("/api/rooms")
}

async fn health() -> &'static str {
    "ok"
}

async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomSummary>>, ApiError> {
    let rooms = state.rooms().await?;
    Ok(Json(rooms.iter().map(RoomRecord::summary).collect()))
}

async fn room_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoomEvents>, ApiError> {
    let room = state.room(&id).await?.ok_or(ApiError::RoomNotFound)?;
    let occupancy = state.occupancy(&room).await;
    let status = occupancy.status();
    Ok(Json(RoomEvents { occupancy, status }))
}

async fn room_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let room = match state.room(&id).await {
        Ok(Some(room)) => room,
        Ok(None) => return (StatusCode::NOT_FOUND, "room not found").into_response(),
        Err(err) => {
            error!(error = %err, "Room registry unavailable");
            return (StatusCode::INTERNAL_SERVER_ERROR, "room registry unavailable")
                .into_response();
        }
    };

    let occupancy = state.occupancy(&room).await;
    let path = format!("/room/{}", urlencoding::encode(&id));
    let requested = params.get(state.status.param()).map(String::as_str);

    match state.status.decide(&path, requested, occupancy.status()) {
        SyncDecision::Redirect(location) => {
            debug!(room = %id, location = %location, "Status changed, redirecting");
            Redirect::to(&location).into_response()
        }
        SyncDecision::Render => {
            Html(render_room(&room, &occupancy, &state.zone, state.page_reload)).into_response()
        }
    }
}
