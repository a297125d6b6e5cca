//! Serve command: runs the HTTP server in the foreground.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;

use roomboard_server::{RoomboardServer, SignalHandler};

use crate::config::AppConfig;
use crate::error::CliResult;

/// Starts the server and blocks until SIGTERM/SIGINT.
pub async fn run(
    config: &AppConfig,
    bind: Option<SocketAddr>,
    rooms: Option<PathBuf>,
) -> CliResult<()> {
    let mut server_config = config.server_config()?;
    if let Some(bind) = bind {
        server_config.bind = bind;
    }
    if let Some(rooms) = rooms {
        server_config.rooms_path = rooms;
    }
    let fetcher_config = config.fetcher_config()?;

    info!(
        zone = %fetcher_config.zone(),
        timeout_secs = fetcher_config.timeout.as_secs(),
        param = server_config.status.param(),
        "Starting roomboard server"
    );

    let server = RoomboardServer::from_config(server_config, fetcher_config)?;

    let signal_handler = SignalHandler::new();
    signal_handler.spawn_listener();

    server.run(signal_handler.shutdown_handle()).await?;
    Ok(())
}
