//! Physical input and the navigation commands it maps to.

use oracle_core::config::InputConfig;
use serde::{Deserialize, Serialize};

/// The two logical navigation calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationCommand {
    /// Next block, or meditation after the last one.
    Advance,
    /// Previous block.
    Retreat,
}

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Pixels from the left edge.
    pub x: f64,
    /// Pixels from the top edge.
    pub y: f64,
}

/// Raw input the page forwards to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// Wheel or trackpad scroll. Positive is downward.
    Wheel { delta_y: f64 },
    /// A completed touch gesture.
    Swipe { start: Point, end: Point },
    /// A pointer click on the scene background.
    Click { y: f64, viewport_height: f64 },
}

impl InputEvent {
    /// Maps this event to a command, or `None` when it means nothing.
    ///
    /// Scrolling down, swiping up and clicking the lower zone advance; the
    /// opposites retreat. Short or mostly horizontal swipes and zero wheel
    /// deltas are ignored.
    #[must_use]
    pub fn to_command(&self, config: &InputConfig) -> Option<NavigationCommand> {
        match *self {
            Self::Wheel { delta_y } => {
                if delta_y > 0.0 {
                    Some(NavigationCommand::Advance)
                } else if delta_y < 0.0 {
                    Some(NavigationCommand::Retreat)
                } else {
                    None
                }
            }
            Self::Swipe { start, end } => {
                let rise = start.y - end.y;
                let drift = (start.x - end.x).abs();
                if !rise.is_finite() || rise.abs() < config.swipe_min_distance || drift > rise.abs() {
                    return None;
                }
                if rise > 0.0 {
                    Some(NavigationCommand::Advance)
                } else {
                    Some(NavigationCommand::Retreat)
                }
            }
            Self::Click { y, viewport_height } => {
                if !y.is_finite() || !viewport_height.is_finite() {
                    return None;
                }
                if y < viewport_height * config.click_split {
                    Some(NavigationCommand::Retreat)
                } else {
                    Some(NavigationCommand::Advance)
                }
            }
        }
    }
}
