//! The composition root for one page session.

use std::sync::Arc;

use oracle_audio::application::orchestrator::{AudioDevices, AudioOrchestrator};
use oracle_core::clock::{Clock, Timer};
use oracle_core::rng::DeterministicRng;
use oracle_core::stage::Stage;
use oracle_core::storage::KeyValueStore;
use oracle_divination::application::sequencer::{DivinationDeps, DivinationSequencer};
use oracle_divination::domain::outcome::DivinationOutcome;
use oracle_history::application::store::HistoryStore;
use oracle_scene::application::controller::{SceneController, SceneDeps};
use oracle_selector::application::selector::SceneSelector;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::manifest::SceneManifest;

/// The host-provided collaborators a session runs against.
pub struct SessionPorts {
    /// Browser-local storage.
    pub store: Arc<dyn KeyValueStore>,
    /// Wall clock, for preference timestamps.
    pub clock: Arc<dyn Clock>,
    /// Every wait goes through here.
    pub timer: Arc<dyn Timer>,
    /// Random source for the destination draw.
    pub rng: Box<dyn DeterministicRng>,
    /// Visual collaborators.
    pub stage: Stage,
    /// Physical audio sources.
    pub audio: AudioDevices,
}

/// Every component of one scene, built once when the page loads and
/// dropped when it navigates away.
pub struct OracleSession {
    id: Uuid,
    scene_id: Option<String>,
    background_source: Option<String>,
    history: HistoryStore,
    audio: Arc<AudioOrchestrator>,
    divination: Arc<DivinationSequencer>,
    controller: SceneController,
}

impl std::fmt::Debug for OracleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleSession")
            .field("id", &self.id)
            .field("scene_id", &self.scene_id)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl OracleSession {
    /// Wires the manifest's scene to `ports`. Nothing plays until
    /// [`init`](Self::init).
    #[must_use]
    pub fn new(manifest: SceneManifest, ports: SessionPorts) -> Self {
        let id = Uuid::new_v4();
        let scene_id = manifest.scene_id();
        let config = manifest.config;

        let history = HistoryStore::new(ports.store.clone());
        let selector = Arc::new(SceneSelector::from_records(&manifest.pool, ports.rng));
        let audio = Arc::new(AudioOrchestrator::new(
            ports.audio,
            config.audio.clone(),
            ports.store.clone(),
            ports.clock,
            ports.timer.clone(),
        ));
        let divination = Arc::new(DivinationSequencer::new(
            DivinationDeps {
                selector,
                history: history.clone(),
                audio: audio.clone(),
                stage: ports.stage.clone(),
                timer: ports.timer.clone(),
            },
            &config.stage,
            scene_id.clone(),
        ));
        let controller = SceneController::new(
            manifest.blocks,
            SceneDeps {
                stage: ports.stage,
                audio: audio.clone(),
                divination: divination.clone(),
                store: ports.store,
                timer: ports.timer,
            },
            config,
        );

        info!(session_id = %id, scene_id = ?scene_id, "session composed");
        Self {
            id,
            scene_id,
            background_source: manifest.audio.background,
            history,
            audio,
            divination,
            controller,
        }
    }

    /// Page load: restores the audio preference, then plays scene entry.
    #[instrument(skip(self), fields(session_id = %self.id, scene_id = ?self.scene_id))]
    pub async fn init(&self) {
        let preference = self.audio.load_preference();
        self.audio
            .initialize(self.background_source.as_deref(), preference)
            .await;
        self.controller.enter_scene().await;
    }

    /// Page unload: the best-effort preference write.
    pub fn teardown(&self) {
        self.audio.persist_on_unload();
    }

    /// Session identifier, for correlating logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The current scene's id, read from its location.
    #[must_use]
    pub fn scene_id(&self) -> Option<&str> {
        self.scene_id.as_deref()
    }

    /// Content navigation and meditation.
    #[must_use]
    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    /// The audio orchestrator.
    #[must_use]
    pub fn audio(&self) -> &AudioOrchestrator {
        &self.audio
    }

    /// The divination sequencer.
    #[must_use]
    pub fn divination(&self) -> &DivinationSequencer {
        &self.divination
    }

    /// The persisted scene history.
    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Walks the scene the way a visitor would: entry, every block, into
    /// meditation, then the hotspot.
    #[instrument(skip(self), fields(session_id = %self.id, scene_id = ?self.scene_id))]
    pub async fn rehearse(&self) -> DivinationOutcome {
        self.init().await;

        // One advance per block plus the one that enters meditation.
        for _ in 0..=self.controller.blocks().len() {
            if self.controller.navigation_state().in_meditation {
                break;
            }
            self.controller.advance().await;
        }

        let outcome = self.controller.activate_hotspot().await;
        info!(?outcome, "rehearsal finished");
        outcome
    }
}
