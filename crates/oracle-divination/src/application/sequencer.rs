//! The divination sequencer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use oracle_audio::application::orchestrator::AudioOrchestrator;
use oracle_audio::domain::channel::SoundEffect;
use oracle_core::clock::Timer;
use oracle_core::config::StageTiming;
use oracle_core::stage::{Stage, VisualProps, VisualTarget};
use oracle_history::application::store::HistoryStore;
use oracle_selector::application::selector::SceneSelector;
use tracing::{debug, error, info, instrument};

use crate::domain::outcome::DivinationOutcome;
use crate::domain::ritual::Ritual;

/// Collaborators the sequencer composes.
#[derive(Clone)]
pub struct DivinationDeps {
    /// Destination draw.
    pub selector: Arc<SceneSelector>,
    /// Where the visitor has been.
    pub history: HistoryStore,
    /// Ritual sound.
    pub audio: Arc<AudioOrchestrator>,
    /// Visual collaborators.
    pub stage: Stage,
    /// Waits between ritual phases.
    pub timer: Arc<dyn Timer>,
}

/// Runs the hotspot-triggered commit to the next scene.
///
/// The hotspot is live only between [`enable`](Self::enable) and the next
/// [`disable`](Self::disable) or trigger, so one activation fires at most
/// one ritual.
pub struct DivinationSequencer {
    deps: DivinationDeps,
    ritual: Ritual,
    current_id: Option<String>,
    enabled: AtomicBool,
}

impl std::fmt::Debug for DivinationSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DivinationSequencer")
            .field("current_id", &self.current_id)
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

impl DivinationSequencer {
    /// Creates a disabled sequencer for the scene `current_id`.
    #[must_use]
    pub fn new(deps: DivinationDeps, timing: &StageTiming, current_id: Option<String>) -> Self {
        Self {
            deps,
            ritual: Ritual::new(timing),
            current_id,
            enabled: AtomicBool::new(false),
        }
    }

    /// Whether the hotspot currently responds.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Makes the hotspot live.
    pub fn enable(&self) {
        if !self.enabled.swap(true, Ordering::SeqCst) {
            self.set_hotspot(true);
            debug!("divination hotspot enabled");
        }
    }

    /// Makes the hotspot inert.
    pub fn disable(&self) {
        if self.enabled.swap(false, Ordering::SeqCst) {
            self.set_hotspot(false);
            debug!("divination hotspot disabled");
        }
    }

    fn set_hotspot(&self, interactive: bool) {
        self.deps.stage.animator.set(
            VisualTarget::MetatronCenter,
            VisualProps::new().interactive(interactive),
        );
    }

    /// Performs the divination.
    ///
    /// Disables the hotspot and stops the facet loop first. If no scene is
    /// eligible the failure is logged and nothing else happens. Otherwise
    /// the current scene is recorded to history, the ritual plays, and the
    /// page navigates to the chosen destination.
    #[instrument(skip(self), fields(current_id = ?self.current_id))]
    pub async fn trigger(&self) -> DivinationOutcome {
        if !self.enabled.swap(false, Ordering::SeqCst) {
            debug!("hotspot activation ignored, divination is not enabled");
            return DivinationOutcome::Inert;
        }
        self.set_hotspot(false);
        self.deps.stage.facets.stop();

        let history = self.deps.history.get_history();
        let Some(destination) = self
            .deps
            .selector
            .select_next(self.current_id.as_deref(), &history)
        else {
            error!(
                history = ?history.ids(),
                pool_size = self.deps.selector.pool().len(),
                "no eligible destination, the scene pool needs more entries"
            );
            return DivinationOutcome::NoDestination;
        };

        if let Some(current) = self.current_id.as_deref() {
            self.deps.history.record(current);
        }
        info!(
            destination = %destination.id,
            url = %destination.url,
            realm = %destination.realm,
            "divination chose next scene"
        );

        self.deps.audio.play_sfx(SoundEffect::Divination).await;
        self.play_ritual().await;

        self.deps.stage.navigator.navigate_to(&destination.url);
        DivinationOutcome::Navigated(destination)
    }

    async fn play_ritual(&self) {
        let animator = &self.deps.stage.animator;
        let ritual = self.ritual.clone();

        self.deps.stage.ambient.hide();
        tokio::join!(
            animator.animate(ritual.goddess),
            async {
                animator.animate(ritual.center_pulse).await;
                animator.animate(ritual.center_collapse).await;
            },
            animator.animate(ritual.title),
            animator.animate(ritual.metatron),
        );
        self.deps.timer.sleep(ritual.hold).await;
    }
}
