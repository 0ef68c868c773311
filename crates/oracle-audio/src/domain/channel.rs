//! Logical audio channels and their tracked state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical audio channel owned by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Ambient bed while browsing content.
    Background,
    /// Bed played during meditation.
    Meditation,
    /// Short percussive cue accompanying a breathing transition.
    BreathCue,
}

impl Channel {
    /// Every channel, in storage order.
    pub const ALL: [Self; 3] = [Self::Background, Self::Meditation, Self::BreathCue];

    /// The beds, in storage order.
    pub const BEDS: [Self; 2] = [Self::Background, Self::Meditation];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Meditation => 1,
            Self::BreathCue => 2,
        }
    }

    /// Returns `true` for the two mutually exclusive beds.
    #[must_use]
    pub fn is_bed(self) -> bool {
        matches!(self, Self::Background | Self::Meditation)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background => write!(f, "background"),
            Self::Meditation => write!(f, "meditation"),
            Self::BreathCue => write!(f, "breath_cue"),
        }
    }
}

/// One-shot interface sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    /// The secondary glyph was activated.
    GoddessClick,
    /// The divination hotspot was activated.
    CenterClick,
    /// The divination ritual began.
    Divination,
}

/// The orchestrator's view of one channel.
///
/// `is_playing` marks the channel that owns the mix. A bed being faded out
/// by a crossfade has already released the mix, so it reads as not playing
/// while its volume falls to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioChannelState {
    /// Tracked volume in `[0, 1]`.
    pub volume: f64,
    /// Whether this channel currently owns playback.
    pub is_playing: bool,
}

impl AudioChannelState {
    /// Whether this channel counts as heard: owning playback at a non-zero
    /// volume.
    #[must_use]
    pub fn is_audible(&self) -> bool {
        self.is_playing && self.volume > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_beds_are_beds() {
        assert!(Channel::Background.is_bed());
        assert!(Channel::Meditation.is_bed());
        assert!(!Channel::BreathCue.is_bed());
    }

    #[test]
    fn test_audible_requires_both_flags() {
        let silent = AudioChannelState {
            volume: 0.0,
            is_playing: true,
        };
        let released = AudioChannelState {
            volume: 0.2,
            is_playing: false,
        };
        let heard = AudioChannelState {
            volume: 0.2,
            is_playing: true,
        };
        assert!(!silent.is_audible());
        assert!(!released.is_audible());
        assert!(heard.is_audible());
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::BreathCue.to_string(), "breath_cue");
    }
}
