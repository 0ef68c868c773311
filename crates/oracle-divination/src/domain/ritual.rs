//! The divination ritual choreography.

use std::time::Duration;

use oracle_core::config::{StageTiming, secs};
use oracle_core::stage::{Easing, Transition, VisualProps, VisualTarget};

/// Scale the hotspot swells to before collapsing.
pub const CENTER_PULSE_SCALE: f64 = 1.5;
/// Scale the primary element shrinks towards.
pub const VANISHING_SCALE: f64 = 0.01;
/// Total spin of the primary element, in degrees.
pub const SPIN_DEGREES: f64 = 720.0;

/// The ritual as four concurrent lanes followed by a hold.
///
/// The hotspot lane is two steps in sequence (pulse, then collapse); every
/// other lane is a single transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Ritual {
    /// Secondary glyph fades back to its dock.
    pub goddess: Transition,
    /// Hotspot swells.
    pub center_pulse: Transition,
    /// Hotspot collapses to nothing.
    pub center_collapse: Transition,
    /// Title fades out.
    pub title: Transition,
    /// Primary element spins and shrinks toward the vanishing point.
    pub metatron: Transition,
    /// Stillness after the animation, before the page changes.
    pub hold: Duration,
}

impl Ritual {
    /// Builds the ritual from the scene's choreography timing.
    #[must_use]
    pub fn new(timing: &StageTiming) -> Self {
        Self {
            goddess: Transition::to(
                VisualTarget::Goddess,
                VisualProps::new()
                    .offset_y(timing.goddess_dock_y)
                    .scale(timing.goddess_dock_scale)
                    .opacity(0.0)
                    .interactive(false),
                secs(timing.goddess_retreat),
                Easing::PowerIn,
            ),
            center_pulse: Transition::to(
                VisualTarget::MetatronCenter,
                VisualProps::new().scale(CENTER_PULSE_SCALE),
                secs(timing.center_pulse),
                Easing::PowerOut,
            ),
            center_collapse: Transition::to(
                VisualTarget::MetatronCenter,
                VisualProps::new().scale(0.0).opacity(0.0),
                secs(timing.center_collapse),
                Easing::PowerIn,
            ),
            title: Transition::to(
                VisualTarget::Title,
                VisualProps::new().opacity(0.0),
                secs(timing.title_fade),
                Easing::PowerIn,
            ),
            metatron: Transition::to(
                VisualTarget::Metatron,
                VisualProps::new()
                    .rotation(SPIN_DEGREES)
                    .scale(VANISHING_SCALE),
                secs(timing.divination),
                Easing::PowerIn,
            ),
            hold: secs(timing.divination_hold),
        }
    }

    /// Time from the start of the ritual until the page may change.
    #[must_use]
    pub fn total(&self) -> Duration {
        let center = self.center_pulse.duration + self.center_collapse.duration;
        [
            self.goddess.duration,
            center,
            self.title.duration,
            self.metatron.duration,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
            + self.hold
    }
}
