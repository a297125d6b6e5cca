//! Error types for calendar ingestion.
//!
//! These errors never leave [`CalendarFetcher`](crate::CalendarFetcher): a
//! failed fetch is logged and degrades to an empty event list so that the
//! display always has a free/busy answer. They exist so the degraded paths
//! can be told apart in logs and tests.

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Connection failed, DNS resolution failed, or the request timed out.
    SourceUnreachable,
    /// The server answered with a non-success status.
    HttpStatus,
    /// The body could not be parsed (XML or iCalendar).
    MalformedPayload,
    /// The configured calendar URL is not a URL.
    InvalidUrl,
    /// Unexpected local failure.
    Internal,
}

impl ProviderErrorCode {
    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceUnreachable => "source_unreachable",
            Self::HttpStatus => "http_status",
            Self::MalformedPayload => "malformed_payload",
            Self::InvalidUrl => "invalid_url",
            Self::Internal => "internal_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while fetching or decoding a calendar.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// HTTP status for [`ProviderErrorCode::HttpStatus`].
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Creates a network error.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::SourceUnreachable, message)
    }

    /// Creates an error for a non-success response. `body` is kept for logs.
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        let mut err = Self::new(ProviderErrorCode::HttpStatus, body);
        err.status = Some(status);
        err
    }

    /// Creates a parse error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::MalformedPayload, message)
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidUrl, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Internal, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({}): {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            format!("request failed: {}", err)
        };
        Self::unreachable(message).with_source(err)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
