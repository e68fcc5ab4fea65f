//! Error type for gateway operations.

use eway_types::{ResolvedCode, ValidationError};

fn join_codes(codes: &[ResolvedCode]) -> String {
    codes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything a gateway call can fail with.
///
/// Transport, status and body failures are kept apart so callers can
/// decide which ones are worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("API call failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Wrong credentials (HTTP {status})")]
    Auth { status: u16 },

    #[error("API HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("API error: {}", join_codes(.codes))]
    Api { codes: Vec<ResolvedCode> },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Auth { status } | ClientError::Http { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Resolved gateway codes for an `Api` error, empty otherwise.
    pub fn codes(&self) -> &[ResolvedCode] {
        match self {
            ClientError::Api { codes } => codes,
            _ => &[],
        }
    }
}
