//! Headless audio: channels that track playback state and log it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use oracle_audio::application::orchestrator::AudioDevices;
use oracle_audio::domain::channel::SoundEffect;
use oracle_core::audio::AudioChannel;
use oracle_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Audio sources a scene declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSources {
    /// Ambient bed.
    pub background: Option<String>,
    /// Meditation bed.
    pub meditation: Option<String>,
    /// Breath cue.
    pub breath_cue: Option<String>,
    /// One-shot effects.
    pub effects: HashMap<SoundEffect, String>,
}

impl AudioSources {
    /// Creates a device per declared source with `make`, and loads every
    /// source except the background bed, which the orchestrator loads when
    /// the session starts.
    #[must_use]
    pub fn devices(&self, make: impl Fn(&str) -> Arc<dyn AudioChannel>) -> AudioDevices {
        let attach = |name: &str, source: &str| {
            let channel = make(name);
            channel.load(source);
            channel
        };

        let mut devices = AudioDevices::new(make("background"));
        if let Some(source) = &self.meditation {
            devices = devices.with_meditation(attach("meditation", source));
        }
        if let Some(source) = &self.breath_cue {
            devices = devices.with_breath_cue(attach("breath_cue", source));
        }
        for (effect, source) in &self.effects {
            devices = devices.with_effect(*effect, attach("effect", source));
        }
        devices
    }
}

#[derive(Debug)]
struct Playback {
    source: Option<String>,
    paused: bool,
    volume: f64,
}

/// A channel that keeps playback state in memory and logs transitions.
/// Playback is never refused.
#[derive(Debug)]
pub struct LoggingAudioChannel {
    name: String,
    playback: Mutex<Playback>,
}

impl LoggingAudioChannel {
    /// Creates a paused channel at full volume.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            playback: Mutex::new(Playback {
                source: None,
                paused: true,
                volume: 1.0,
            }),
        }
    }

    fn playback(&self) -> MutexGuard<'_, Playback> {
        self.playback.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The loaded source.
    #[must_use]
    pub fn source(&self) -> Option<String> {
        self.playback().source.clone()
    }
}

#[async_trait]
impl AudioChannel for LoggingAudioChannel {
    fn load(&self, source: &str) {
        self.playback().source = Some(source.to_owned());
        debug!(channel = %self.name, source, "audio source loaded");
    }

    async fn play(&self) -> Result<(), DomainError> {
        let mut playback = self.playback();
        if playback.paused {
            playback.paused = false;
            debug!(channel = %self.name, source = ?playback.source, "audio playing");
        }
        Ok(())
    }

    fn pause(&self) {
        let mut playback = self.playback();
        if !playback.paused {
            playback.paused = true;
            debug!(channel = %self.name, "audio paused");
        }
    }

    fn rewind(&self) {}

    fn set_volume(&self, volume: f64) {
        self.playback().volume = volume.clamp(0.0, 1.0);
    }

    fn is_paused(&self) -> bool {
        self.playback().paused
    }
}
