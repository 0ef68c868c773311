//! Timing and tuning configuration for a scene.
//!
//! All durations are seconds, matching how scene authors write them in the
//! manifest. Every field has a default, so a manifest only lists overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Longest single wait any authored value can produce.
pub const MAX_WAIT: Duration = Duration::from_secs(24 * 60 * 60);

/// Converts authored seconds into a `Duration`, treating negative or NaN
/// values as zero and capping everything else at [`MAX_WAIT`].
#[must_use]
pub fn secs(value: f64) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(value).map_or(MAX_WAIT, |d| d.min(MAX_WAIT))
}

/// Complete scene configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Breathing transition timing.
    pub breath: BreathTiming,
    /// Audio levels and fades.
    pub audio: AudioTiming,
    /// Scene choreography.
    pub stage: StageTiming,
    /// Input thresholds.
    pub input: InputConfig,
}

/// Timing of the contract-to-center / expand-from-center transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathTiming {
    /// Outgoing block contracting to the center.
    pub breath_in: f64,
    /// Hold between contraction and expansion.
    pub breath_pause: f64,
    /// Incoming block expanding from the center.
    pub breath_out: f64,
    /// Settle time after a transition before input is accepted again.
    pub cooldown: f64,
}

impl Default for BreathTiming {
    fn default() -> Self {
        Self {
            breath_in: 0.8,
            breath_pause: 0.2,
            breath_out: 1.2,
            cooldown: 0.3,
        }
    }
}

/// Audio levels and fade windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioTiming {
    /// Volume of an audible bed.
    pub standard_volume: f64,
    /// Fade used on session start and by crossfades.
    pub fade: f64,
    /// Fade used by the audio toggle.
    pub toggle_fade: f64,
    /// Fraction of the bed's volume removed while a cue plays.
    pub duck_fraction: f64,
    /// Ramp into the ducked level.
    pub duck_in: f64,
    /// Ramp back out of the ducked level.
    pub duck_out: f64,
    /// Known length of the breath cue.
    pub breath_cue: f64,
    /// Interval between volume ramp steps.
    pub ramp_tick: f64,
    /// Volume of one-shot effects.
    pub sfx_volume: f64,
}

impl Default for AudioTiming {
    fn default() -> Self {
        Self {
            standard_volume: 0.35,
            fade: 1.0,
            toggle_fade: 0.3,
            duck_fraction: 0.15,
            duck_in: 0.2,
            duck_out: 0.3,
            breath_cue: 1.7,
            ramp_tick: 0.05,
            sfx_volume: 0.5,
        }
    }
}

/// Scene choreography constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageTiming {
    /// Primary element breathing out on scene entry.
    pub entry_breathe: f64,
    /// Ambient effect fade-in on scene entry.
    pub ambient_reveal: f64,
    /// Primary element dimming to content opacity.
    pub content_dim: f64,
    /// Glyph travel between dock and center.
    pub meditation_transition: f64,
    /// Wait before the glyph starts toward the center.
    pub goddess_center_delay: f64,
    /// Wait before the primary element brightens or dims around meditation.
    pub metatron_delay: f64,
    /// Primary element brightening on entering meditation.
    pub metatron_raise: f64,
    /// Primary element dimming on leaving meditation.
    pub metatron_dim: f64,
    /// Primary element spin-and-shrink during divination.
    pub divination: f64,
    /// Glyph fading back to its dock during divination.
    pub goddess_retreat: f64,
    /// Hotspot swell at the start of divination.
    pub center_pulse: f64,
    /// Hotspot collapse after the swell.
    pub center_collapse: f64,
    /// Title fade during divination.
    pub title_fade: f64,
    /// Stillness after the ritual, before the page changes.
    pub divination_hold: f64,
    /// Docked glyph offset, viewport-height units.
    pub goddess_dock_y: f64,
    /// Docked glyph scale.
    pub goddess_dock_scale: f64,
    /// Centered glyph scale.
    pub goddess_center_scale: f64,
    /// Primary element opacity while browsing content.
    pub metatron_content_opacity: f64,
    /// Primary element opacity during meditation.
    pub metatron_meditation_opacity: f64,
    /// Primary element scale once the scene has entered.
    pub metatron_scale: f64,
    /// Pause before a scene without content drops into meditation.
    pub empty_scene_meditation_delay: f64,
}

impl Default for StageTiming {
    fn default() -> Self {
        Self {
            entry_breathe: 1.2,
            ambient_reveal: 1.0,
            content_dim: 0.6,
            meditation_transition: 1.4,
            goddess_center_delay: 0.2,
            metatron_delay: 0.3,
            metatron_raise: 0.9,
            metatron_dim: 0.7,
            divination: 2.6,
            goddess_retreat: 0.8,
            center_pulse: 0.4,
            center_collapse: 0.6,
            title_fade: 0.8,
            divination_hold: 0.5,
            goddess_dock_y: 20.0,
            goddess_dock_scale: 0.5,
            goddess_center_scale: 1.0,
            metatron_content_opacity: 0.3,
            metatron_meditation_opacity: 1.0,
            metatron_scale: 1.25,
            empty_scene_meditation_delay: 1.0,
        }
    }
}

/// Thresholds used to turn raw input into navigation commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Minimum vertical travel of a swipe, in pixels.
    pub swipe_min_distance: f64,
    /// Fraction of the viewport height separating the retreat zone (above)
    /// from the advance zone (below).
    pub click_split: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            swipe_min_distance: 50.0,
            click_split: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_authored_scene_values() {
        let cfg = OracleConfig::default();
        assert!((cfg.breath.breath_in - 0.8).abs() < f64::EPSILON);
        assert!((cfg.audio.standard_volume - 0.35).abs() < f64::EPSILON);
        assert!((cfg.stage.divination - 2.6).abs() < f64::EPSILON);
        assert!((cfg.input.swipe_min_distance - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_secs_rejects_negative_and_nan() {
        assert_eq!(secs(-1.0), Duration::ZERO);
        assert_eq!(secs(f64::NAN), Duration::ZERO);
        assert_eq!(secs(0.25), Duration::from_millis(250));
    }

    #[test]
    fn test_secs_caps_huge_and_infinite_values() {
        assert_eq!(secs(1e30), MAX_WAIT);
        assert_eq!(secs(f64::INFINITY), MAX_WAIT);
        assert_eq!(secs(90_000.0), MAX_WAIT);
    }

    #[test]
    fn test_choreography_timings_are_overridable() {
        let cfg: OracleConfig = serde_json::from_str(
            r#"{ "stage": { "metatron_raise": 2.0, "divination_hold": 0.0 } }"#,
        )
        .unwrap();
        assert!((cfg.stage.metatron_raise - 2.0).abs() < f64::EPSILON);
        assert_eq!(secs(cfg.stage.divination_hold), Duration::ZERO);
        assert!((cfg.stage.goddess_center_delay - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let cfg: OracleConfig =
            serde_json::from_str(r#"{ "breath": { "cooldown": 0.5 } }"#).unwrap();
        assert!((cfg.breath.cooldown - 0.5).abs() < f64::EPSILON);
        assert!((cfg.breath.breath_out - 1.2).abs() < f64::EPSILON);
        assert_eq!(cfg.audio, AudioTiming::default());
    }
}
