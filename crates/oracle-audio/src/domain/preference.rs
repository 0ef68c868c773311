//! The visitor's persisted audio preference.

use serde::{Deserialize, Serialize};

/// Whether the visitor wants audio, stored as
/// `{ "isPlaying": bool, "volume": number, "timestamp": number }`.
///
/// Written on every explicit toggle and on page unload, read once when a
/// scene starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPreference {
    /// Whether audio was on.
    pub is_playing: bool,
    /// Volume the visitor last heard.
    pub volume: f64,
    /// Milliseconds since the Unix epoch when this was written.
    pub timestamp: i64,
}

impl AudioPreference {
    /// The stored volume if usable, otherwise `fallback`.
    #[must_use]
    pub fn volume_or(&self, fallback: f64) -> f64 {
        if self.volume.is_finite() && self.volume > 0.0 {
            self.volume.min(1.0)
        } else {
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_uses_camel_case() {
        let pref = AudioPreference {
            is_playing: true,
            volume: 0.35,
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(pref).unwrap();
        assert_eq!(json["isPlaying"], true);
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
    }

    #[test]
    fn test_volume_or_rejects_unusable_values() {
        let mut pref = AudioPreference {
            is_playing: true,
            volume: 0.0,
            timestamp: 0,
        };
        assert!((pref.volume_or(0.35) - 0.35).abs() < f64::EPSILON);
        pref.volume = 4.0;
        assert!((pref.volume_or(0.35) - 1.0).abs() < f64::EPSILON);
        pref.volume = 0.6;
        assert!((pref.volume_or(0.35) - 0.6).abs() < f64::EPSILON);
    }
}
