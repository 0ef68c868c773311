//! Headless stage: visual collaborators that log instead of render.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use oracle_core::clock::Timer;
use oracle_core::stage::{
    AmbientEffect, Animator, FacetLoop, Navigator, Stage, Transition, VisualProps, VisualTarget,
};
use tracing::{debug, info};

/// Logs each transition and waits out its duration on the timer.
pub struct LoggingAnimator {
    timer: Arc<dyn Timer>,
}

impl LoggingAnimator {
    #[must_use]
    pub fn new(timer: Arc<dyn Timer>) -> Self {
        Self { timer }
    }
}

#[async_trait]
impl Animator for LoggingAnimator {
    async fn animate(&self, transition: Transition) {
        debug!(
            target_element = ?transition.target,
            to = ?transition.to,
            duration_ms = transition.duration.as_millis(),
            easing = ?transition.easing,
            "animate"
        );
        self.timer.sleep(transition.duration).await;
    }

    fn set(&self, target: VisualTarget, props: VisualProps) {
        debug!(target_element = ?target, ?props, "set");
    }
}

/// Logs ambient-effect changes.
#[derive(Debug, Default)]
pub struct LoggingAmbient;

impl AmbientEffect for LoggingAmbient {
    fn reveal(&self) {
        debug!("ambient effect revealed");
    }

    fn hide(&self) {
        debug!("ambient effect hidden");
    }
}

/// Tracks whether the facet loop would be running.
#[derive(Debug, Default)]
pub struct LoggingFacets {
    running: AtomicBool,
}

impl LoggingFacets {
    /// Whether the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl FacetLoop for LoggingFacets {
    fn start(&self) {
        if !self.running.swap(true, Ordering::SeqCst) {
            debug!("facet loop started");
        }
    }

    fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            debug!("facet loop stopped");
        }
    }
}

/// Remembers where the page would have gone.
#[derive(Debug, Default)]
pub struct CapturingNavigator {
    destination: Mutex<Option<String>>,
}

impl CapturingNavigator {
    /// The last URL navigated to.
    #[must_use]
    pub fn destination(&self) -> Option<String> {
        self.destination
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for CapturingNavigator {
    fn navigate_to(&self, url: &str) {
        info!(url, "page navigation");
        *self.destination.lock().unwrap_or_else(PoisonError::into_inner) = Some(url.to_owned());
    }
}

/// Builds a headless [`Stage`] whose animations take their time on `timer`.
/// Returns the navigator separately so the caller can read the destination.
#[must_use]
pub fn headless_stage(timer: Arc<dyn Timer>) -> (Stage, Arc<CapturingNavigator>) {
    let navigator = Arc::new(CapturingNavigator::default());
    let stage = Stage {
        animator: Arc::new(LoggingAnimator::new(timer)),
        ambient: Arc::new(LoggingAmbient),
        facets: Arc::new(LoggingFacets::default()),
        navigator: navigator.clone(),
    };
    (stage, navigator)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use oracle_core::stage::Easing;
    use oracle_test_support::VirtualTimer;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_animator_waits_out_transition() {
        let timer = Arc::new(VirtualTimer::new());
        let (stage, _) = headless_stage(timer.clone());
        stage
            .animator
            .animate(Transition::to(
                VisualTarget::Title,
                VisualProps::new().opacity(0.0),
                Duration::from_millis(800),
                Easing::PowerIn,
            ))
            .await;
        assert_eq!(timer.requested(), [Duration::from_millis(800)]);
    }

    #[test]
    fn test_navigator_captures_destination() {
        let navigator = CapturingNavigator::default();
        assert_eq!(navigator.destination(), None);
        navigator.navigate_to("/scenes/river/");
        assert_eq!(navigator.destination().as_deref(), Some("/scenes/river/"));
    }

    #[test]
    fn test_facets_track_running_state() {
        let facets = LoggingFacets::default();
        facets.start();
        facets.start();
        assert!(facets.is_running());
        facets.stop();
        assert!(!facets.is_running());
    }
}
