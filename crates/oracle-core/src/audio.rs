//! Audio channel abstraction.
//!
//! One implementation per physical playback source (background bed,
//! meditation bed, breath cue, one-shot effects). Codec and element details
//! stay behind this trait.

use async_trait::async_trait;

use crate::error::DomainError;

/// Playback primitives for a single audio source.
#[async_trait]
pub trait AudioChannel: Send + Sync {
    /// Replaces the channel's source and rewinds it.
    fn load(&self, source: &str);

    /// Starts (or resumes) playback from the current position.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PlaybackRefused` when the host environment
    /// blocks playback, typically until a direct user gesture.
    async fn play(&self) -> Result<(), DomainError>;

    /// Pauses playback. Pausing a paused channel is a no-op.
    fn pause(&self);

    /// Rewinds to the start of the source.
    fn rewind(&self);

    /// Sets the output volume, clamped to `[0, 1]` by the implementation.
    fn set_volume(&self, volume: f64);

    /// Returns `true` while the channel is not playing.
    fn is_paused(&self) -> bool;
}
