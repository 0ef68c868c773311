//! Test audio: an in-memory `AudioChannel`.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use oracle_core::audio::AudioChannel;
use oracle_core::error::DomainError;

/// Point-in-time view of a `FakeAudioChannel`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSnapshot {
    /// Loaded source, if any.
    pub source: Option<String>,
    /// Whether playback is paused.
    pub paused: bool,
    /// Current volume.
    pub volume: f64,
    /// Number of successful `play` calls.
    pub plays: usize,
    /// Number of `rewind` calls.
    pub rewinds: usize,
}

#[derive(Debug)]
struct ChannelInner {
    snapshot: ChannelSnapshot,
    refuse_play: bool,
    start_delay: Duration,
}

/// A channel that tracks playback state without producing sound. Can be
/// told to refuse playback, like a browser waiting for a user gesture, or to
/// take a while before playback starts, like a stream still buffering.
#[derive(Debug)]
pub struct FakeAudioChannel {
    inner: Mutex<ChannelInner>,
}

impl Default for FakeAudioChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeAudioChannel {
    /// Creates a paused, silent channel that accepts playback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ChannelInner {
                snapshot: ChannelSnapshot {
                    source: None,
                    paused: true,
                    volume: 1.0,
                    plays: 0,
                    rewinds: 0,
                },
                refuse_play: false,
                start_delay: Duration::ZERO,
            }),
        }
    }

    /// Creates a channel whose `play` always fails.
    #[must_use]
    pub fn refusing() -> Self {
        let channel = Self::new();
        channel.set_refuse_play(true);
        channel
    }

    /// Creates a channel whose `play` resolves only after `delay` of tokio
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn slow_start(delay: Duration) -> Self {
        let channel = Self::new();
        channel.inner.lock().unwrap().start_delay = delay;
        channel
    }

    /// Toggles whether `play` fails.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn set_refuse_play(&self, refuse: bool) {
        self.inner.lock().unwrap().refuse_play = refuse;
    }

    /// Returns the channel's current state.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn snapshot(&self) -> ChannelSnapshot {
        self.inner.lock().unwrap().snapshot.clone()
    }
}

#[async_trait]
impl AudioChannel for FakeAudioChannel {
    fn load(&self, source: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.snapshot.source = Some(source.to_owned());
        inner.snapshot.rewinds += 1;
    }

    async fn play(&self) -> Result<(), DomainError> {
        let (refuse, delay) = {
            let inner = self.inner.lock().unwrap();
            (inner.refuse_play, inner.start_delay)
        };
        if refuse {
            return Err(DomainError::PlaybackRefused(
                "playback requires a user gesture".into(),
            ));
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let mut inner = self.inner.lock().unwrap();
        inner.snapshot.paused = false;
        inner.snapshot.plays += 1;
        Ok(())
    }

    fn pause(&self) {
        self.inner.lock().unwrap().snapshot.paused = true;
    }

    fn rewind(&self) {
        self.inner.lock().unwrap().snapshot.rewinds += 1;
    }

    fn set_volume(&self, volume: f64) {
        self.inner.lock().unwrap().snapshot.volume = volume.clamp(0.0, 1.0);
    }

    fn is_paused(&self) -> bool {
        self.inner.lock().unwrap().snapshot.paused
    }
}
