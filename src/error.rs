use thiserror::Error;

use crate::config::MAX_FIRST_ID;
use crate::types::ListenerId;

// ---------------------------------------------------------------------------
// EventError
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Subscription for event \"{event}\" has no callback")]
    MissingCallback { event: String },

    #[error("Invalid registry options: {0}")]
    InvalidOptions(String),
}

impl EventError {
    pub(crate) fn invalid_first_id(first_id: ListenerId) -> Self {
        Self::InvalidOptions(format!(
            "first_id must be between 1 and {MAX_FIRST_ID}, got {first_id}"
        ))
    }
}

/// Convenience alias — the default error type is `EventError`.
pub type Result<T, E = EventError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
