//! Server error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error (listener, file, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Could not bind the listening address.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The room registry could not be read.
    #[error("Room store error ({path}): {message}")]
    Store { path: PathBuf, message: String },

    /// The calendar fetcher could not be built.
    #[error("Provider error: {0}")]
    Provider(#[from] roomboard_providers::ProviderError),

    /// A blocking registry read did not complete.
    #[error("Room store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    /// Creates a store error.
    pub fn store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Store {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a bind error.
    pub fn bind(addr: impl Into<String>, source: io::Error) -> Self {
        Self::Bind {
            addr: addr.into(),
            source,
        }
    }
}
