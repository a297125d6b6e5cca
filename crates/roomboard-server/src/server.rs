//! HTTP server lifecycle.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use roomboard_providers::{CalendarFetcher, FetcherConfig};

use crate::config::ServerConfig;
use crate::engine::OccupancyEngine;
use crate::error::{ServerError, ServerResult};
use crate::routes::{AppState, build_router};
use crate::signals::ShutdownHandle;
use crate::store::JsonFileStore;

/// The roomboard HTTP server.
pub struct RoomboardServer {
    config: ServerConfig,
    state: AppState,
}

impl RoomboardServer {
    /// Creates a server with explicit state.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Wires the file-backed registry and the HTTP calendar fetcher.
    pub fn from_config(config: ServerConfig, fetcher: FetcherConfig) -> ServerResult<Self> {
        let zone = *fetcher.zone();
        let store = JsonFileStore::new(&config.rooms_path);
        let engine = OccupancyEngine::new(Arc::new(CalendarFetcher::new(fetcher)?));

        let state = AppState::new(Arc::new(store), engine)
            .with_status(config.status.clone())
            .with_zone(zone)
            .with_page_reload(config.page_reload);

        Ok(Self::new(config, state))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serves until `shutdown` fires.
    pub async fn run(self, shutdown: ShutdownHandle) -> ServerResult<()> {
        let listener = TcpListener::bind(self.config.bind)
            .await
            .map_err(|e| ServerError::bind(self.config.bind.to_string(), e))?;
        let addr = listener.local_addr()?;

        info!(
            addr = %addr,
            rooms = %self.config.rooms_path.display(),
            "Listening"
        );

        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}
