//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// None of these are fatal to a scene: services catch them where the port
/// is called, log them and fall back to their "off" or "empty" default.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Browser-local storage is unavailable, full, or holds unreadable data.
    #[error("storage error: {0}")]
    Storage(String),

    /// The host environment refused to start audio playback.
    #[error("playback refused: {0}")]
    PlaybackRefused(String),

    /// Declared content failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Any other collaborator failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(format!("serialization failed: {err}"))
    }
}
