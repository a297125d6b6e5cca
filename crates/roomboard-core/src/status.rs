//! Status tokens and the display synchronisation protocol.
//!
//! A room display asserts the token it is showing in a query parameter on
//! its own URL. When a freshly computed token differs from the one in the
//! URL, the display is sent to the canonical URL carrying the new token
//! before anything is rendered. Anything watching navigation (the kiosk's
//! hardware dispatcher, for one) therefore sees exactly one URL change per
//! free/busy transition instead of one per poll.
//!
//! The token is computed once per request and at most one redirect is
//! issued for it, so a state flip between two requests costs one extra hop
//! and can never chain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The free/busy signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusToken {
    /// Nothing is running.
    Free,
    /// An event is running.
    Busy,
}

impl StatusToken {
    /// Maps the occupancy flag to a token.
    pub fn for_occupancy(is_free: bool) -> Self {
        if is_free { Self::Free } else { Self::Busy }
    }

    /// Returns the canonical name of this token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Busy => "busy",
        }
    }
}

impl fmt::Display for StatusToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "busy" => Ok(Self::Busy),
            other => Err(format!("unknown status token: {}", other)),
        }
    }
}

/// What a display request should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    /// The URL already carries the computed token.
    Render,
    /// Send the client to this location first.
    Redirect(String),
}

/// Query-parameter binding between tokens and the labels a client expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSync {
    param: String,
    free_label: String,
    busy_label: String,
}

impl Default for StatusSync {
    /// The labels understood by the kiosk's hardware dispatcher.
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_PARAM,
            Self::DEFAULT_FREE_LABEL,
            Self::DEFAULT_BUSY_LABEL,
        )
    }
}

impl StatusSync {
    /// Default query parameter name.
    pub const DEFAULT_PARAM: &'static str = "rmspanel";

    /// Default label for [`StatusToken::Free`].
    pub const DEFAULT_FREE_LABEL: &'static str = "green";

    /// Default label for [`StatusToken::Busy`].
    pub const DEFAULT_BUSY_LABEL: &'static str = "red";

    /// Creates a binding with custom names.
    pub fn new(
        param: impl Into<String>,
        free_label: impl Into<String>,
        busy_label: impl Into<String>,
    ) -> Self {
        Self {
            param: param.into(),
            free_label: free_label.into(),
            busy_label: busy_label.into(),
        }
    }

    /// Returns the query parameter name.
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Returns the wire label for `token`.
    pub fn label(&self, token: StatusToken) -> &str {
        match token {
            StatusToken::Free => &self.free_label,
            StatusToken::Busy => &self.busy_label,
        }
    }

    /// Maps a wire label back to its token.
    pub fn token_for_label(&self, label: &str) -> Option<StatusToken> {
        if label == self.free_label {
            Some(StatusToken::Free)
        } else if label == self.busy_label {
            Some(StatusToken::Busy)
        } else {
            None
        }
    }

    /// Builds the canonical URL of `path` asserting `token`.
    pub fn location(&self, path: &str, token: StatusToken) -> String {
        format!(
            "{}?{}={}",
            path,
            urlencoding::encode(&self.param),
            urlencoding::encode(self.label(token))
        )
    }

    /// Decides whether a request for `path` carrying `requested` may render
    /// the freshly `computed` token or must be redirected first.
    pub fn decide(
        &self,
        path: &str,
        requested: Option<&str>,
        computed: StatusToken,
    ) -> SyncDecision {
        if requested == Some(self.label(computed)) {
            SyncDecision::Render
        } else {
            SyncDecision::Redirect(self.location(path, computed))
        }
    }
}
