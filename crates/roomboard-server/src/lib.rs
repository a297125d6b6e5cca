//! HTTP surface for roomboard.
//!
//! This crate serves room displays:
//! - a read-only room registry ([`RoomStore`], file-backed or in memory)
//! - the [`OccupancyEngine`] (fetch then resolve, once per request)
//! - the axum routes, including the status-synchronised room view
//! - graceful shutdown on SIGTERM/SIGINT
//!
//! # Example
//!
//! ```rust,no_run
//! use roomboard_providers::FetcherConfig;
//! use roomboard_server::{RoomboardServer, ServerConfig, SignalHandler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = RoomboardServer::from_config(ServerConfig::default(), FetcherConfig::new())?;
//!     let signals = SignalHandler::new();
//!     signals.spawn_listener();
//!     server.run(signals.shutdown_handle()).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod engine;
mod error;
mod routes;
mod server;
mod signals;
mod store;
mod view;

pub use config::ServerConfig;
pub use engine::OccupancyEngine;
pub use error::{ServerError, ServerResult};
pub use routes::{AppState, Clock, build_router};
pub use server::RoomboardServer;
pub use signals::{ShutdownHandle, SignalHandler};
pub use store::{JsonFileStore, MemoryStore, RoomRecord, RoomStore, RoomSummary};
pub use view::render_room;
