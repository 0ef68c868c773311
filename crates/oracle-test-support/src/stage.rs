//! Test stage: recording implementations of the visual collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use oracle_core::stage::{
    AmbientEffect, Animator, FacetLoop, Navigator, Stage, Transition, VisualProps, VisualTarget,
};

/// An animator that records every transition and `set` call. Transitions
/// take their declared duration on tokio's clock, so tests should run with
/// paused time.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    transitions: Mutex<Vec<Transition>>,
    sets: Mutex<Vec<(VisualTarget, VisualProps)>>,
}

impl RecordingAnimator {
    /// Creates an animator with empty logs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every started transition, in start order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn transitions(&self) -> Vec<Transition> {
        self.transitions.lock().unwrap().clone()
    }

    /// Returns the started transitions that animate `target`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn transitions_for(&self, target: &VisualTarget) -> Vec<Transition> {
        self.transitions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| &t.target == target)
            .cloned()
            .collect()
    }

    /// Returns every immediate property assignment, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn sets(&self) -> Vec<(VisualTarget, VisualProps)> {
        self.sets.lock().unwrap().clone()
    }
}

#[async_trait]
impl Animator for RecordingAnimator {
    async fn animate(&self, transition: Transition) {
        let duration = transition.duration;
        self.transitions.lock().unwrap().push(transition);
        tokio::time::sleep(duration).await;
    }

    fn set(&self, target: VisualTarget, props: VisualProps) {
        self.sets.lock().unwrap().push((target, props));
    }
}

/// Counts ambient-effect reveals and hides.
#[derive(Debug, Default)]
pub struct RecordingAmbient {
    calls: Mutex<(usize, usize)>,
}

impl RecordingAmbient {
    /// Creates a recorder with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `reveal` calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn reveals(&self) -> usize {
        self.calls.lock().unwrap().0
    }

    /// Number of `hide` calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn hides(&self) -> usize {
        self.calls.lock().unwrap().1
    }
}

impl AmbientEffect for RecordingAmbient {
    fn reveal(&self) {
        self.calls.lock().unwrap().0 += 1;
    }

    fn hide(&self) {
        self.calls.lock().unwrap().1 += 1;
    }
}

/// Tracks whether the facet loop is running and how often it was started.
#[derive(Debug, Default)]
pub struct RecordingFacets {
    state: Mutex<(bool, usize, usize)>,
}

impl RecordingFacets {
    /// Creates a stopped loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the loop is currently running.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn is_running(&self) -> bool {
        self.state.lock().unwrap().0
    }

    /// Number of `start` calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn starts(&self) -> usize {
        self.state.lock().unwrap().1
    }

    /// Number of `stop` calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stops(&self) -> usize {
        self.state.lock().unwrap().2
    }
}

impl FacetLoop for RecordingFacets {
    fn start(&self) {
        let mut state = self.state.lock().unwrap();
        state.0 = true;
        state.1 += 1;
    }

    fn stop(&self) {
        let mut state = self.state.lock().unwrap();
        state.0 = false;
        state.2 += 1;
    }
}

/// Records page navigations instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Creates a navigator with no visits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every URL navigated to, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, url: &str) {
        self.visited.lock().unwrap().push(url.to_owned());
    }
}

/// A full set of recording collaborators plus the `Stage` built from them.
#[derive(Debug, Clone, Default)]
pub struct RecordingStage {
    /// Recording animator.
    pub animator: Arc<RecordingAnimator>,
    /// Recording ambient effect.
    pub ambient: Arc<RecordingAmbient>,
    /// Recording facet loop.
    pub facets: Arc<RecordingFacets>,
    /// Recording navigator.
    pub navigator: Arc<RecordingNavigator>,
}

impl RecordingStage {
    /// Creates fresh recorders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a `Stage` sharing these recorders.
    #[must_use]
    pub fn stage(&self) -> Stage {
        Stage {
            animator: self.animator.clone(),
            ambient: self.ambient.clone(),
            facets: self.facets.clone(),
            navigator: self.navigator.clone(),
        }
    }
}
