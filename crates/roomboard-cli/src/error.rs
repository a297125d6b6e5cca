//! CLI error types.

use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The requested room is not in the registry.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server error.
    #[error(transparent)]
    Server(#[from] roomboard_server::ServerError),

    /// Provider error.
    #[error("provider error: {0}")]
    Provider(#[from] roomboard_providers::ProviderError),

    /// Logging could not be set up.
    #[error(transparent)]
    Tracing(#[from] roomboard_core::TracingError),
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
