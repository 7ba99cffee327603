//! User-visible notices emitted by the client

use serde::Serialize;

/// Outcome of a mutation, shown to the user as a toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ClientEvent {
    Success(String),
    Failure(String),
}

impl ClientEvent {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}
