//! Navigation state of one scene.

use serde::Serialize;

/// The page-lifetime navigation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    /// Index into the navigable blocks.
    pub current_index: usize,
    /// A breathing or meditation transition is in flight.
    pub is_transitioning: bool,
    /// The cooldown after the last transition has elapsed.
    pub can_advance: bool,
    /// Meditation mode is active.
    pub in_meditation: bool,
    /// The opening animation has finished.
    pub scene_entry_complete: bool,
    /// Index the visitor was at when meditation began.
    pub return_index: usize,
}

impl NavigationState {
    /// Whether a navigation command may start now.
    #[must_use]
    pub fn accepts_navigation(&self) -> bool {
        self.scene_entry_complete && !self.in_meditation && !self.is_transitioning && self.can_advance
    }
}

/// Where content browsing resumes after meditation.
///
/// Returns `recorded`, except that leaving from the last block restarts at
/// the first one; otherwise the next advance would drop straight back into
/// meditation.
#[must_use]
pub fn return_index_after_meditation(recorded: usize, block_count: usize) -> usize {
    if block_count == 0 || recorded + 1 >= block_count {
        0
    } else {
        recorded
    }
}
