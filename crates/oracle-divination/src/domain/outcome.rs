//! Result of one hotspot activation.

use oracle_selector::domain::pool::ScenePoolEntry;

/// What a divination trigger did.
#[derive(Debug, Clone, PartialEq)]
pub enum DivinationOutcome {
    /// The hotspot was not enabled; nothing happened.
    Inert,
    /// No scene was eligible. The hotspot stays disabled.
    NoDestination,
    /// The ritual played and the page left for this scene.
    Navigated(ScenePoolEntry),
}

impl DivinationOutcome {
    /// The chosen scene, if the trigger navigated.
    #[must_use]
    pub fn destination(&self) -> Option<&ScenePoolEntry> {
        match self {
            Self::Navigated(entry) => Some(entry),
            Self::Inert | Self::NoDestination => None,
        }
    }
}
