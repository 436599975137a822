//! Error types for daily report retrieval.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to Slack or loading settings.
#[derive(Error, Debug)]
pub enum Error {
    /// Slack answered with `ok: false`.
    #[error("Slack API error in {method}: {reason}")]
    Api {
        method: &'static str,
        reason: String,
    },

    /// Transport failure or non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("Failed to decode {method} response: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Local filesystem error (log directory creation).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Machine-readable reason code reported by Slack, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Error::Api { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Whether Slack itself rejected the call, as opposed to a local failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}
