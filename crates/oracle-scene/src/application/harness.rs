//! Fixtures shared by the controller and meditation tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use oracle_audio::application::orchestrator::{AudioDevices, AudioOrchestrator};
use oracle_audio::domain::channel::SoundEffect;
use oracle_core::config::{OracleConfig, StageTiming};
use oracle_core::stage::{BlockHandle, VisualTarget};
use oracle_divination::application::sequencer::{DivinationDeps, DivinationSequencer};
use oracle_history::application::store::HistoryStore;
use oracle_selector::application::selector::SceneSelector;
use oracle_selector::domain::pool::ScenePoolEntry;
use oracle_test_support::{
    FakeAudioChannel, FixedClock, InMemoryStore, MockRng, RecordingStage, VirtualTimer,
};

use super::controller::{SceneController, SceneDeps};
use crate::domain::blocks::ContentBlock;

pub(crate) struct Harness {
    pub(crate) stage: RecordingStage,
    pub(crate) store: Arc<InMemoryStore>,
    pub(crate) audio: Arc<AudioOrchestrator>,
    pub(crate) background: Arc<FakeAudioChannel>,
    pub(crate) meditation: Arc<FakeAudioChannel>,
    pub(crate) breath: Arc<FakeAudioChannel>,
    pub(crate) chime: Arc<FakeAudioChannel>,
    pub(crate) divination: Arc<DivinationSequencer>,
    pub(crate) controller: SceneController,
}

pub(crate) fn block_target(index: usize) -> VisualTarget {
    VisualTarget::ContentBlock(BlockHandle(format!("block{index}")))
}

fn scene(id: &str) -> ScenePoolEntry {
    ScenePoolEntry {
        id: id.to_owned(),
        url: format!("/scenes/{id}/"),
        weight: 1.0,
        realm: "water".to_owned(),
    }
}

/// A controller over `block_count` blocks in the scene "forest", whose
/// pool also holds "river".
pub(crate) fn harness(block_count: usize) -> Harness {
    let stage = RecordingStage::new();
    let store = Arc::new(InMemoryStore::new());
    let timer = Arc::new(VirtualTimer::new());
    let background = Arc::new(FakeAudioChannel::new());
    let meditation = Arc::new(FakeAudioChannel::new());
    let breath = Arc::new(FakeAudioChannel::new());
    let chime = Arc::new(FakeAudioChannel::new());

    let audio = Arc::new(AudioOrchestrator::new(
        AudioDevices::new(background.clone())
            .with_meditation(meditation.clone())
            .with_breath_cue(breath.clone())
            .with_effect(SoundEffect::CenterClick, chime.clone()),
        OracleConfig::default().audio,
        store.clone(),
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
        )),
        timer.clone(),
    ));
    let divination = Arc::new(DivinationSequencer::new(
        DivinationDeps {
            selector: Arc::new(SceneSelector::new(
                vec![scene("forest"), scene("river")],
                Box::new(MockRng),
            )),
            history: HistoryStore::new(store.clone()),
            audio: audio.clone(),
            stage: stage.stage(),
            timer: timer.clone(),
        },
        &StageTiming::default(),
        Some("forest".to_owned()),
    ));

    let blocks = (0..block_count)
        .map(|i| ContentBlock {
            handle: BlockHandle(format!("block{i}")),
            text: format!("Passage {i}"),
            has_media: false,
        })
        .collect();
    let controller = SceneController::new(
        blocks,
        SceneDeps {
            stage: stage.stage(),
            audio: audio.clone(),
            divination: divination.clone(),
            store: store.clone(),
            timer,
        },
        OracleConfig::default(),
    );

    Harness {
        stage,
        store,
        audio,
        background,
        meditation,
        breath,
        chime,
        divination,
        controller,
    }
}

/// Like [`harness`], with the scene entry already played.
pub(crate) async fn entered(block_count: usize) -> Harness {
    let h = harness(block_count);
    h.controller.enter_scene().await;
    h
}
