//! The audio orchestrator.
//!
//! Every change to channel volume or playback goes through here. Volume
//! changes are ramps stepped on the injected `Timer`; each ramp claims its
//! channel with an epoch, and a newer ramp on the same channel makes the
//! older one stop at its next step.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use oracle_core::audio::AudioChannel;
use oracle_core::clock::{Clock, Timer};
use oracle_core::config::{AudioTiming, secs};
use oracle_core::error::DomainError;
use oracle_core::storage::{AUDIO_STATE_KEY, KeyValueStore};
use tracing::{debug, info, instrument, warn};

use crate::domain::channel::{AudioChannelState, Channel, SoundEffect};
use crate::domain::preference::AudioPreference;

/// The physical sources behind the logical channels.
#[derive(Clone)]
pub struct AudioDevices {
    /// Ambient bed. Always present.
    pub background: Arc<dyn AudioChannel>,
    /// Meditation bed, if the scene declares one.
    pub meditation: Option<Arc<dyn AudioChannel>>,
    /// Breath cue, if the scene declares one.
    pub breath_cue: Option<Arc<dyn AudioChannel>>,
    /// One-shot interface sounds.
    pub effects: HashMap<SoundEffect, Arc<dyn AudioChannel>>,
}

impl AudioDevices {
    /// Devices with only a background bed.
    #[must_use]
    pub fn new(background: Arc<dyn AudioChannel>) -> Self {
        Self {
            background,
            meditation: None,
            breath_cue: None,
            effects: HashMap::new(),
        }
    }

    /// Adds the meditation bed.
    #[must_use]
    pub fn with_meditation(mut self, channel: Arc<dyn AudioChannel>) -> Self {
        self.meditation = Some(channel);
        self
    }

    /// Adds the breath cue.
    #[must_use]
    pub fn with_breath_cue(mut self, channel: Arc<dyn AudioChannel>) -> Self {
        self.breath_cue = Some(channel);
        self
    }

    /// Adds a one-shot effect.
    #[must_use]
    pub fn with_effect(mut self, effect: SoundEffect, channel: Arc<dyn AudioChannel>) -> Self {
        self.effects.insert(effect, channel);
        self
    }

    fn get(&self, channel: Channel) -> Option<&Arc<dyn AudioChannel>> {
        match channel {
            Channel::Background => Some(&self.background),
            Channel::Meditation => self.meditation.as_ref(),
            Channel::BreathCue => self.breath_cue.as_ref(),
        }
    }
}

#[derive(Debug, Default)]
struct Mix {
    enabled: bool,
    active: Option<Channel>,
    states: [AudioChannelState; 3],
    epochs: [u64; 3],
    /// Bumped by every change of the visitor's intent (on/off, which bed).
    /// An operation that awaited playback only finishes if it is unchanged.
    intent: u64,
    /// Level a ducked bed returns to, shared by overlapping ducks.
    ducked_from: [Option<f64>; 3],
}

impl Mix {
    fn active(&self) -> Channel {
        self.active.unwrap_or(Channel::Background)
    }

    fn state(&self, channel: Channel) -> AudioChannelState {
        self.states[channel.index()]
    }

    fn state_mut(&mut self, channel: Channel) -> &mut AudioChannelState {
        &mut self.states[channel.index()]
    }

    fn epoch(&self, channel: Channel) -> u64 {
        self.epochs[channel.index()]
    }

    fn claim(&mut self, channel: Channel) -> u64 {
        self.epochs[channel.index()] += 1;
        self.epochs[channel.index()]
    }

    fn declare_intent(&mut self) -> u64 {
        self.intent += 1;
        self.intent
    }

    fn wants(&self, channel: Channel) -> bool {
        self.enabled && self.active() == channel
    }

    /// Volume `channel` sits at once any duck on it has ended.
    fn resting_volume(&self, channel: Channel) -> f64 {
        self.ducked_from[channel.index()].unwrap_or(self.state(channel).volume)
    }
}

/// Owns the scene's audio channels and the persisted audio preference.
pub struct AudioOrchestrator {
    devices: AudioDevices,
    timing: AudioTiming,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    timer: Arc<dyn Timer>,
    mix: Mutex<Mix>,
}

impl std::fmt::Debug for AudioOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioOrchestrator")
            .field("timing", &self.timing)
            .field("mix", &*self.mix())
            .finish_non_exhaustive()
    }
}

impl AudioOrchestrator {
    /// Creates an orchestrator with every channel silent.
    #[must_use]
    pub fn new(
        devices: AudioDevices,
        timing: AudioTiming,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        timer: Arc<dyn Timer>,
    ) -> Self {
        Self {
            devices,
            timing,
            store,
            clock,
            timer,
            mix: Mutex::new(Mix::default()),
        }
    }

    fn mix(&self) -> MutexGuard<'_, Mix> {
        self.mix.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-takes the mix after `device.play()` resolved for `channel`.
    ///
    /// Returns the guard when no intent change happened while playback was
    /// starting. Otherwise the newer operation owns the outcome; `device` is
    /// silenced unless the mix still wants `channel`.
    fn settle(
        &self,
        channel: Channel,
        device: &dyn AudioChannel,
        intent: u64,
    ) -> Option<MutexGuard<'_, Mix>> {
        let mix = self.mix();
        if mix.intent == intent {
            return Some(mix);
        }
        if !mix.wants(channel) {
            device.pause();
            device.set_volume(0.0);
        }
        debug!(%channel, "playback started after the visitor changed course");
        None
    }

    fn standard_volume(&self) -> f64 {
        self.timing.standard_volume.clamp(0.0, 1.0)
    }

    /// Whether the visitor currently wants audio.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.mix().enabled
    }

    /// The bed that owns (or would own) the mix.
    #[must_use]
    pub fn active_channel(&self) -> Channel {
        self.mix().active()
    }

    /// The tracked state of `channel`.
    #[must_use]
    pub fn channel_state(&self, channel: Channel) -> AudioChannelState {
        self.mix().state(channel)
    }

    /// Reads the persisted preference. Missing, unreadable or corrupt
    /// storage all yield `None`.
    #[must_use]
    pub fn load_preference(&self) -> Option<AudioPreference> {
        let raw = match self.store.get(AUDIO_STATE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "could not read audio preference");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(pref) => Some(pref),
            Err(e) => {
                warn!(error = %e, "audio preference is corrupt, ignoring it");
                None
            }
        }
    }

    fn persist(&self, is_playing: bool, volume: f64) {
        let pref = AudioPreference {
            is_playing,
            volume,
            timestamp: self.clock.now().timestamp_millis(),
        };
        let write = serde_json::to_string(&pref)
            .map_err(DomainError::from)
            .and_then(|json| self.store.set(AUDIO_STATE_KEY, &json));
        if let Err(e) = write {
            warn!(error = %e, "could not save audio preference");
        }
    }

    fn ramp_steps(&self, duration: Duration) -> u32 {
        let tick = secs(self.timing.ramp_tick);
        if tick.is_zero() || duration.is_zero() {
            return 1;
        }
        let steps = (duration.as_secs_f64() / tick.as_secs_f64()).ceil();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = steps.clamp(1.0, f64::from(u32::MAX)) as u32;
        steps
    }

    /// Ramps `channel` to `target` over `duration`. Returns the epoch the
    /// ramp ran under, or `None` if a newer ramp took the channel over or
    /// the channel has no device.
    async fn ramp(&self, channel: Channel, target: f64, duration: Duration) -> Option<u64> {
        let device = self.devices.get(channel)?.clone();
        let (from, epoch) = {
            let mut mix = self.mix();
            let epoch = mix.claim(channel);
            (mix.state(channel).volume, epoch)
        };

        let steps = self.ramp_steps(duration);
        for step in 1..=steps {
            self.timer.sleep(duration / steps).await;
            let volume = from + (target - from) * f64::from(step) / f64::from(steps);
            {
                let mut mix = self.mix();
                if mix.epoch(channel) != epoch {
                    return None;
                }
                mix.state_mut(channel).volume = volume;
            }
            device.set_volume(volume);
        }
        Some(epoch)
    }

    /// Prepares the background bed for a new scene.
    ///
    /// Loads `source` into the background channel. Audio only starts when a
    /// stored preference says the visitor had it on; a first visit is
    /// silent. Refused playback is logged and leaves audio off.
    #[instrument(skip(self, preference), fields(resume = preference.is_some_and(|p| p.is_playing)))]
    pub async fn initialize(&self, source: Option<&str>, preference: Option<AudioPreference>) {
        let background = self.devices.background.clone();
        if let Some(source) = source {
            background.load(source);
        }
        for channel in Channel::ALL {
            if let Some(device) = self.devices.get(channel) {
                device.pause();
                device.set_volume(0.0);
            }
        }
        let resume = preference.filter(|p| p.is_playing);
        let intent = {
            let mut mix = self.mix();
            for channel in Channel::ALL {
                mix.claim(channel);
            }
            mix.enabled = resume.is_some();
            mix.active = Some(Channel::Background);
            mix.states = [AudioChannelState::default(); 3];
            mix.ducked_from = [None; 3];
            mix.declare_intent()
        };

        let Some(pref) = resume else {
            info!("audio starts silent");
            return;
        };

        if let Err(e) = background.play().await {
            warn!(error = %e, "could not resume audio, leaving it off");
            let mut mix = self.mix();
            if mix.intent == intent {
                mix.enabled = false;
            }
            return;
        }
        {
            let Some(mut mix) = self.settle(Channel::Background, background.as_ref(), intent)
            else {
                return;
            };
            mix.state_mut(Channel::Background).is_playing = true;
        }
        let volume = pref.volume_or(self.standard_volume());
        info!(volume, "resuming audio from stored preference");
        self.ramp(Channel::Background, volume, secs(self.timing.fade))
            .await;
    }

    /// Turns audio on or off for the active bed and persists the choice.
    /// Returns the new on/off state.
    #[instrument(skip(self))]
    pub async fn toggle(&self) -> bool {
        let (enabled, active) = {
            let mix = self.mix();
            (mix.enabled, mix.active())
        };
        if enabled {
            self.turn_off(active).await;
            false
        } else {
            self.turn_on(active).await
        }
    }

    async fn turn_off(&self, active: Channel) {
        // A bed may still be sounding mid-crossfade, so fade out every bed
        // that is playing, not just the active one.
        let fading = {
            let mut mix = self.mix();
            mix.declare_intent();
            mix.enabled = false;
            let fading = Channel::BEDS.map(|bed| bed == active || mix.state(bed).is_playing);
            for bed in Channel::BEDS {
                mix.state_mut(bed).is_playing = false;
                mix.ducked_from[bed.index()] = None;
            }
            fading
        };
        self.silence_breath_cue();
        self.persist(false, self.standard_volume());
        info!(channel = %active, "audio off");

        let [background, meditation] = Channel::BEDS;
        tokio::join!(
            self.fade_out(background, fading[0]),
            self.fade_out(meditation, fading[1])
        );
    }

    async fn fade_out(&self, bed: Channel, sounding: bool) {
        if sounding
            && self
                .ramp(bed, 0.0, secs(self.timing.toggle_fade))
                .await
                .is_some()
            && let Some(device) = self.devices.get(bed)
        {
            device.pause();
        }
    }

    async fn turn_on(&self, active: Channel) -> bool {
        let active = if self.devices.get(active).is_some() {
            active
        } else {
            Channel::Background
        };
        let Some(device) = self.devices.get(active).cloned() else {
            return false;
        };

        let intent = {
            let mut mix = self.mix();
            mix.enabled = true;
            mix.active = Some(active);
            mix.declare_intent()
        };

        if device.is_paused()
            && let Err(e) = device.play().await
        {
            warn!(error = %e, channel = %active, "audio play failed, leaving audio off");
            let mut mix = self.mix();
            if mix.intent == intent {
                mix.enabled = false;
            }
            return false;
        }

        let volume = self.standard_volume();
        {
            let Some(mut mix) = self.settle(active, device.as_ref(), intent) else {
                return self.is_enabled();
            };
            mix.state_mut(active).is_playing = true;
        }
        self.persist(true, volume);
        info!(channel = %active, "audio on");

        self.ramp(active, volume, secs(self.timing.toggle_fade))
            .await;
        true
    }

    fn silence_breath_cue(&self) {
        if let Some(cue) = &self.devices.breath_cue {
            cue.pause();
            cue.set_volume(0.0);
        }
        let mut mix = self.mix();
        mix.claim(Channel::BreathCue);
        *mix.state_mut(Channel::BreathCue) = AudioChannelState::default();
    }

    /// Hands the mix to `target`.
    ///
    /// The incoming bed starts at zero and rises to the standard volume
    /// while the outgoing bed falls to zero, in lockstep over one fade
    /// window; the outgoing bed is paused at the end. Does nothing audible
    /// while the visitor has audio off, but remembers `target` so a later
    /// toggle resumes the right bed. A no-op when `target` already owns the
    /// mix.
    #[instrument(skip(self))]
    pub async fn crossfade_to(&self, target: Channel) {
        if !target.is_bed() {
            warn!(channel = %target, "only beds can own the mix");
            return;
        }

        let (outgoing, enabled, intent) = {
            let mut mix = self.mix();
            let outgoing = mix.active();
            if outgoing == target {
                return;
            }
            mix.active = Some(target);
            (outgoing, mix.enabled, mix.declare_intent())
        };

        if !enabled {
            debug!(channel = %target, "crossfade skipped, audio is off");
            return;
        }

        let Some(incoming) = self.devices.get(target).cloned() else {
            warn!(channel = %target, "scene declares no source for this channel");
            let mut mix = self.mix();
            if mix.intent == intent {
                mix.active = Some(outgoing);
            }
            return;
        };

        incoming.rewind();
        incoming.set_volume(0.0);
        if let Err(e) = incoming.play().await {
            warn!(error = %e, channel = %target, "crossfade failed, keeping current bed");
            let mut mix = self.mix();
            if mix.intent == intent {
                mix.active = Some(outgoing);
            }
            return;
        }

        let outgoing_device = self.devices.get(outgoing).cloned();

        let (start_out, epoch_in, epoch_out) = {
            let Some(mut mix) = self.settle(target, incoming.as_ref(), intent) else {
                return;
            };
            let epoch_in = mix.claim(target);
            let epoch_out = mix.claim(outgoing);
            *mix.state_mut(target) = AudioChannelState {
                volume: 0.0,
                is_playing: true,
            };
            mix.ducked_from = [None; 3];
            let out = mix.state_mut(outgoing);
            out.is_playing = false;
            (out.volume, epoch_in, epoch_out)
        };

        let volume = self.standard_volume();
        let duration = secs(self.timing.fade);
        let steps = self.ramp_steps(duration);
        info!(from = %outgoing, to = %target, "crossfading");

        for step in 1..=steps {
            self.timer.sleep(duration / steps).await;
            let t = f64::from(step) / f64::from(steps);
            let (set_in, set_out) = {
                let mut mix = self.mix();
                let set_in = mix.epoch(target) == epoch_in;
                let set_out = mix.epoch(outgoing) == epoch_out;
                if set_in {
                    mix.state_mut(target).volume = volume * t;
                }
                if set_out {
                    mix.state_mut(outgoing).volume = start_out * (1.0 - t);
                }
                (set_in, set_out)
            };
            if set_in {
                incoming.set_volume(volume * t);
            }
            if let Some(device) = outgoing_device.as_ref().filter(|_| set_out) {
                device.set_volume(start_out * (1.0 - t));
            }
            if !set_in && !set_out {
                break;
            }
        }

        let still_owned = self.mix().epoch(outgoing) == epoch_out;
        if still_owned && let Some(device) = outgoing_device {
            device.pause();
            device.set_volume(0.0);
            self.mix().state_mut(outgoing).volume = 0.0;
        }
    }

    /// Lowers the active bed by the configured fraction for `duration`,
    /// then restores it. Does nothing while audio is off.
    #[instrument(skip(self))]
    pub async fn duck(&self, duration: Duration) {
        let (active, original) = {
            let mut mix = self.mix();
            if !mix.enabled {
                return;
            }
            let active = mix.active();
            // An overlapping duck restores to the level the first one found.
            let current = mix.state(active).volume;
            let original = *mix.ducked_from[active.index()].get_or_insert(current);
            (active, original)
        };

        let fraction = self.timing.duck_fraction.clamp(0.0, 1.0);
        let ducked = original * (1.0 - fraction);
        let Some(epoch) = self.ramp(active, ducked, secs(self.timing.duck_in)).await else {
            return;
        };

        self.timer.sleep(duration).await;

        let restore = {
            let mix = self.mix();
            mix.enabled && mix.active() == active && mix.epoch(active) == epoch
        };
        if restore
            && let Some(epoch) = self.ramp(active, original, secs(self.timing.duck_out)).await
        {
            let mut mix = self.mix();
            if mix.epoch(active) == epoch {
                mix.ducked_from[active.index()] = None;
            }
        }
    }

    /// Plays the breath cue and ducks the active bed under it.
    #[instrument(skip(self))]
    pub async fn play_breath_cue(&self) {
        if !self.is_enabled() {
            return;
        }
        let cue_length = secs(self.timing.breath_cue);

        if let Some(cue) = self.devices.breath_cue.clone() {
            let volume = self.standard_volume();
            cue.rewind();
            cue.set_volume(volume);
            match cue.play().await {
                Ok(()) => {
                    let mut mix = self.mix();
                    if mix.enabled {
                        *mix.state_mut(Channel::BreathCue) = AudioChannelState {
                            volume,
                            is_playing: true,
                        };
                    } else {
                        cue.pause();
                        cue.set_volume(0.0);
                        return;
                    }
                }
                Err(e) => warn!(error = %e, "breath cue failed"),
            }
        }

        self.duck(cue_length).await;
        self.mix().state_mut(Channel::BreathCue).is_playing = false;
    }

    /// Plays a one-shot interface sound, if the scene declares it and audio
    /// is on.
    pub async fn play_sfx(&self, effect: SoundEffect) {
        if !self.is_enabled() {
            return;
        }
        let Some(device) = self.devices.effects.get(&effect).cloned() else {
            return;
        };
        device.rewind();
        device.set_volume(self.timing.sfx_volume.clamp(0.0, 1.0));
        if let Err(e) = device.play().await {
            warn!(error = %e, ?effect, "sound effect failed");
        }
    }

    /// Best-effort write of the current on/off state as the page goes away.
    pub fn persist_on_unload(&self) {
        let (enabled, volume) = {
            let mix = self.mix();
            (mix.enabled, mix.resting_volume(mix.active()))
        };
        let volume = if volume > 0.0 {
            volume
        } else {
            self.standard_volume()
        };
        self.persist(enabled, volume);
    }

    /// Deletes the stored preference, so the next scene starts silent.
    pub fn reset_preference(&self) {
        if let Err(e) = self.store.remove(AUDIO_STATE_KEY) {
            warn!(error = %e, "could not reset audio preference");
        }
    }
}
