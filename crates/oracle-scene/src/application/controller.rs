//! The scene controller: scene entry and content navigation.
//!
//! Meditation mode lives in its own module but drives the same
//! [`SceneController`] and shares its navigation state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use oracle_audio::application::orchestrator::AudioOrchestrator;
use oracle_audio::domain::channel::SoundEffect;
use oracle_core::clock::Timer;
use oracle_core::config::{OracleConfig, secs};
use oracle_core::stage::{BlockHandle, Easing, Stage, Transition, VisualProps, VisualTarget};
use oracle_core::storage::KeyValueStore;
use oracle_divination::application::sequencer::DivinationSequencer;
use oracle_divination::domain::outcome::DivinationOutcome;
use tracing::{debug, info, instrument, warn};

use crate::domain::blocks::{ContentBlock, navigable};
use crate::domain::commands::{InputEvent, NavigationCommand};
use crate::domain::state::NavigationState;

/// Collaborators the controller drives.
#[derive(Clone)]
pub struct SceneDeps {
    /// Visual collaborators.
    pub stage: Stage,
    /// Sole owner of audio.
    pub audio: Arc<AudioOrchestrator>,
    /// Hotspot ritual, live only during meditation.
    pub divination: Arc<DivinationSequencer>,
    /// Session-resume hints.
    pub store: Arc<dyn KeyValueStore>,
    /// Waits between choreography phases.
    pub timer: Arc<dyn Timer>,
}

/// Owns the navigation state of one scene.
///
/// Every public operation checks its guard conditions first and returns
/// early when they fail, so input arriving mid-transition is dropped rather
/// than queued.
pub struct SceneController {
    pub(crate) blocks: Vec<BlockHandle>,
    pub(crate) deps: SceneDeps,
    pub(crate) config: OracleConfig,
    state: Mutex<NavigationState>,
    entry_started: AtomicBool,
}

impl std::fmt::Debug for SceneController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneController")
            .field("blocks", &self.blocks)
            .field("state", &self.navigation_state())
            .finish_non_exhaustive()
    }
}

impl SceneController {
    /// Creates a controller over the blocks that have content.
    #[must_use]
    pub fn new(blocks: Vec<ContentBlock>, deps: SceneDeps, config: OracleConfig) -> Self {
        let blocks = navigable(blocks);
        info!(navigable = blocks.len(), "scene blocks ready");
        Self {
            blocks,
            deps,
            config,
            state: Mutex::new(NavigationState::default()),
            entry_started: AtomicBool::new(false),
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, NavigationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A snapshot of the navigation state.
    #[must_use]
    pub fn navigation_state(&self) -> NavigationState {
        *self.state()
    }

    /// The navigable blocks, in order.
    #[must_use]
    pub fn blocks(&self) -> &[BlockHandle] {
        &self.blocks
    }

    /// Plays the opening animation and unlocks navigation.
    ///
    /// The primary element breathes out and dims, the ambient effect is
    /// revealed, then the title and first block breathe out. A scene with
    /// no content drops into meditation shortly after. Only the first call
    /// does anything.
    #[instrument(skip(self), fields(blocks = self.blocks.len()))]
    pub async fn enter_scene(&self) {
        if self.entry_started.swap(true, Ordering::SeqCst) {
            return;
        }
        let stage = &self.config.stage;
        let animator = &self.deps.stage.animator;

        for handle in &self.blocks {
            animator.set(
                VisualTarget::ContentBlock(handle.clone()),
                VisualProps::new().scale(0.0).opacity(0.0),
            );
        }
        animator.set(VisualTarget::Title, VisualProps::new().scale(0.0).opacity(0.0));
        animator.set(
            VisualTarget::Goddess,
            VisualProps::new()
                .offset_y(stage.goddess_dock_y)
                .scale(stage.goddess_dock_scale)
                .interactive(true),
        );

        self.deps.stage.ambient.reveal();
        animator
            .animate(Transition::from_to(
                VisualTarget::Metatron,
                VisualProps::new().scale(0.0).opacity(0.0),
                VisualProps::new().scale(stage.metatron_scale).opacity(1.0),
                secs(stage.entry_breathe),
                Easing::PowerOut,
            ))
            .await;
        animator
            .animate(Transition::to(
                VisualTarget::Metatron,
                VisualProps::new().opacity(stage.metatron_content_opacity),
                secs(stage.content_dim),
                Easing::SineInOut,
            ))
            .await;

        let title = animator.animate(self.breathe_out(VisualTarget::Title));
        let first = async {
            if let Some(handle) = self.blocks.first() {
                animator
                    .animate(self.breathe_out(VisualTarget::ContentBlock(handle.clone())))
                    .await;
            }
        };
        tokio::join!(title, first);

        {
            let mut state = self.state();
            state.scene_entry_complete = true;
            state.can_advance = true;
        }
        info!("scene entry complete");

        if self.blocks.is_empty() {
            info!("scene has no content, entering meditation");
            self.deps
                .timer
                .sleep(secs(stage.empty_scene_meditation_delay))
                .await;
            self.enter_meditation().await;
        }
    }

    /// Moves to the next block, or into meditation from the last one.
    #[instrument(skip(self))]
    pub async fn advance(&self) {
        let target = {
            let mut state = self.state();
            if !state.accepts_navigation() {
                debug!(?state, "advance ignored");
                return;
            }
            let next = state.current_index + 1;
            if next >= self.blocks.len() {
                None
            } else {
                state.is_transitioning = true;
                state.can_advance = false;
                Some((state.current_index, next))
            }
        };

        match target {
            Some((from, to)) => self.breathe(from, to).await,
            None => {
                info!("content exhausted, entering meditation");
                self.enter_meditation().await;
            }
        }
    }

    /// Moves to the previous block. The first block is a hard floor.
    #[instrument(skip(self))]
    pub async fn retreat(&self) {
        let target = {
            let mut state = self.state();
            if !state.accepts_navigation() {
                debug!(?state, "retreat ignored");
                return;
            }
            if state.current_index == 0 || self.blocks.is_empty() {
                debug!("already at first block");
                return;
            }
            state.is_transitioning = true;
            state.can_advance = false;
            (state.current_index, state.current_index - 1)
        };
        self.breathe(target.0, target.1).await;
    }

    /// Normalizes a raw input event and dispatches the resulting command.
    pub async fn handle_input(&self, event: InputEvent) {
        {
            let state = self.state();
            if state.in_meditation || !state.scene_entry_complete {
                return;
            }
        }
        match event.to_command(&self.config.input) {
            Some(NavigationCommand::Advance) => self.advance().await,
            Some(NavigationCommand::Retreat) => self.retreat().await,
            None => {}
        }
    }

    /// Forwards a hotspot activation to the divination sequencer while in
    /// meditation.
    #[instrument(skip(self))]
    pub async fn activate_hotspot(&self) -> DivinationOutcome {
        {
            let state = self.state();
            if !state.in_meditation || !state.scene_entry_complete {
                return DivinationOutcome::Inert;
            }
        }
        if !self.deps.divination.is_enabled() {
            debug!("hotspot is inert");
            return DivinationOutcome::Inert;
        }
        self.deps.audio.play_sfx(SoundEffect::CenterClick).await;
        self.deps.divination.trigger().await
    }

    /// The breathing transition from block `from` to block `to`.
    ///
    /// The index moves only once the incoming block has fully breathed out;
    /// input unlocks a cooldown later.
    async fn breathe(&self, from: usize, to: usize) {
        let breath = &self.config.breath;
        let animator = &self.deps.stage.animator;
        info!(from, to, "breathing transition");

        let visual = async {
            animator
                .animate(Transition::to(
                    VisualTarget::ContentBlock(self.blocks[from].clone()),
                    VisualProps::new().scale(0.0),
                    secs(breath.breath_in),
                    Easing::PowerIn,
                ))
                .await;
            self.deps.timer.sleep(secs(breath.breath_pause)).await;
            animator
                .animate(self.breathe_out(VisualTarget::ContentBlock(self.blocks[to].clone())))
                .await;

            {
                let mut state = self.state();
                state.current_index = to;
                state.is_transitioning = false;
            }
            self.deps.timer.sleep(secs(breath.cooldown)).await;
            self.state().can_advance = true;
            debug!(index = to, "navigation ready");
        };

        tokio::join!(self.deps.audio.play_breath_cue(), visual);
    }

    pub(crate) fn breathe_out(&self, target: VisualTarget) -> Transition {
        Transition::from_to(
            target,
            VisualProps::new().scale(0.0).opacity(1.0),
            VisualProps::new().scale(1.0),
            secs(self.config.breath.breath_out),
            Easing::PowerOut,
        )
    }

    pub(crate) fn write_hint(&self, key: &str, value: &str) {
        if let Err(e) = self.deps.store.set(key, value) {
            warn!(error = %e, key, "could not save session hint");
        }
    }
}
