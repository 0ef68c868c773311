//! Meditation mode on the scene controller.

use oracle_audio::domain::channel::{Channel, SoundEffect};
use oracle_core::config::secs;
use oracle_core::stage::{Easing, Transition, VisualProps, VisualTarget};
use oracle_core::storage::{IN_MEDITATION_KEY, LAST_CONTENT_BLOCK_KEY};
use tracing::{debug, info, instrument};

use super::controller::SceneController;
use crate::domain::state::return_index_after_meditation;

impl SceneController {
    /// Switches from reading to meditation.
    ///
    /// Hides the current block, brings the glyph to the center, raises the
    /// primary element and crossfades to the meditation bed. Once that
    /// completes the facet loop starts and the divination hotspot goes live.
    #[instrument(skip(self))]
    pub async fn enter_meditation(&self) {
        let from = {
            let mut state = self.state();
            if state.in_meditation || !state.scene_entry_complete || state.is_transitioning {
                debug!(?state, "enter meditation ignored");
                return;
            }
            state.in_meditation = true;
            state.is_transitioning = true;
            state.can_advance = false;
            state.return_index = state.current_index;
            state.current_index
        };
        info!(from, "entering meditation");
        self.write_hint(LAST_CONTENT_BLOCK_KEY, &from.to_string());
        self.write_hint(IN_MEDITATION_KEY, "true");

        let stage = &self.config.stage;
        let animator = &self.deps.stage.animator;
        let timer = &self.deps.timer;
        let metatron_delay = secs(stage.metatron_delay);

        let hide_block = async {
            if let Some(handle) = self.blocks.get(from) {
                animator
                    .animate(Transition::to(
                        VisualTarget::ContentBlock(handle.clone()),
                        VisualProps::new().scale(0.0).opacity(0.0),
                        secs(stage.content_dim),
                        Easing::PowerIn,
                    ))
                    .await;
            }
        };
        let goddess = async {
            timer.sleep(secs(stage.goddess_center_delay)).await;
            animator
                .animate(Transition::to(
                    VisualTarget::Goddess,
                    VisualProps::new()
                        .offset_y(0.0)
                        .scale(stage.goddess_center_scale),
                    secs(stage.meditation_transition),
                    Easing::PowerInOut,
                ))
                .await;
        };
        let metatron = async {
            timer.sleep(metatron_delay).await;
            animator
                .animate(Transition::to(
                    VisualTarget::Metatron,
                    VisualProps::new().opacity(stage.metatron_meditation_opacity),
                    secs(stage.metatron_raise),
                    Easing::PowerOut,
                ))
                .await;
        };
        tokio::join!(
            hide_block,
            goddess,
            metatron,
            self.deps.audio.crossfade_to(Channel::Meditation)
        );

        self.deps.stage.facets.start();
        self.deps.divination.enable();
        self.state().is_transitioning = false;
        info!("meditation active");
    }

    /// Switches from meditation back to reading.
    ///
    /// Browsing resumes at the block the visitor left from, or at the first
    /// block if they left from the last one.
    #[instrument(skip(self))]
    pub async fn exit_meditation(&self) {
        let to = {
            let mut state = self.state();
            if !state.in_meditation || state.is_transitioning {
                debug!(?state, "exit meditation ignored");
                return;
            }
            state.in_meditation = false;
            state.is_transitioning = true;
            state.can_advance = false;
            return_index_after_meditation(state.return_index, self.blocks.len())
        };
        info!(to, "leaving meditation");
        self.deps.divination.disable();
        self.deps.stage.facets.stop();
        self.write_hint(IN_MEDITATION_KEY, "false");

        let stage = &self.config.stage;
        let animator = &self.deps.stage.animator;
        let timer = &self.deps.timer;
        let metatron_delay = secs(stage.metatron_delay);
        let travel = secs(stage.meditation_transition);

        let goddess = animator.animate(Transition::to(
            VisualTarget::Goddess,
            VisualProps::new()
                .offset_y(stage.goddess_dock_y)
                .scale(stage.goddess_dock_scale),
            travel,
            Easing::PowerInOut,
        ));
        let metatron = async {
            timer.sleep(metatron_delay).await;
            animator
                .animate(Transition::to(
                    VisualTarget::Metatron,
                    VisualProps::new().opacity(stage.metatron_content_opacity),
                    secs(stage.metatron_dim),
                    Easing::PowerIn,
                ))
                .await;
        };
        let block = async {
            timer.sleep(travel.saturating_sub(metatron_delay)).await;
            if let Some(handle) = self.blocks.get(to) {
                animator
                    .animate(self.breathe_out(VisualTarget::ContentBlock(handle.clone())))
                    .await;
            }
        };
        tokio::join!(
            goddess,
            metatron,
            block,
            self.deps.audio.crossfade_to(Channel::Background)
        );

        {
            let mut state = self.state();
            state.current_index = to;
            state.is_transitioning = false;
            state.can_advance = true;
        }
        info!(index = to, "returned to content");
    }

    /// Enters or leaves meditation, as a tap on the glyph does.
    pub async fn toggle_meditation(&self) {
        let in_meditation = {
            let state = self.state();
            if !state.scene_entry_complete {
                return;
            }
            state.in_meditation
        };
        self.deps.audio.play_sfx(SoundEffect::GoddessClick).await;
        if in_meditation {
            self.exit_meditation().await;
        } else {
            self.enter_meditation().await;
        }
    }
}
