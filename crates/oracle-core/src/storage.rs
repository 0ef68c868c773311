//! Browser-local key/value storage abstraction.

use crate::error::DomainError;

/// Slot holding the JSON array of recently visited scene ids.
pub const SCENE_HISTORY_KEY: &str = "ah_scene_history";

/// Slot holding the JSON user audio preference.
pub const AUDIO_STATE_KEY: &str = "ah_audio_state";

/// Slot holding the content block index the user left for meditation.
pub const LAST_CONTENT_BLOCK_KEY: &str = "ah_last_content_block";

/// Slot holding `"true"`/`"false"` for whether meditation was active.
pub const IN_MEDITATION_KEY: &str = "ah_in_meditation";

/// Synchronous string store scoped to one browser profile.
///
/// Every call may fail (storage disabled, quota exceeded). Callers treat a
/// failure as "nothing stored" and log it.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the store cannot be written.
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}
