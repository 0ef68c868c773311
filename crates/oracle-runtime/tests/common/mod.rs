//! Shared helpers for session integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::TimeZone;
use oracle_audio::application::orchestrator::AudioDevices;
use oracle_core::rng::DeterministicRng;
use oracle_runtime::manifest::SceneManifest;
use oracle_runtime::session::{OracleSession, SessionPorts};
use oracle_test_support::{
    FakeAudioChannel, FixedClock, InMemoryStore, MockRng, RecordingStage, VirtualTimer,
};

/// A session plus handles on its fakes.
pub struct TestSession {
    pub session: OracleSession,
    pub stage: RecordingStage,
    pub background: Arc<FakeAudioChannel>,
}

/// Manifest for scene `id` with three blocks and a pool of `pool` scene ids.
pub fn manifest(id: &str, pool: &[&str]) -> SceneManifest {
    let pool_yaml: String = pool
        .iter()
        .map(|p| format!("  - {{ id: {p}, url: /scenes/{p}/, weight: 1, realm: air }}\n"))
        .collect();
    let yaml = format!(
        "scene_path: /scenes/{id}/\n\
         audio:\n  background: {id}.mp3\n  meditation: om.mp3\n\
         blocks:\n  - {{ handle: intro, text: Hello }}\n  - {{ handle: quote, text: Listen }}\n  - {{ handle: prompt0, text: Breathe }}\n\
         pool:\n{pool_yaml}"
    );
    SceneManifest::from_yaml(&yaml).unwrap()
}

/// Composes a session over `store` with fakes and the given RNG.
pub fn session_with_rng(
    manifest: SceneManifest,
    store: Arc<InMemoryStore>,
    rng: Box<dyn DeterministicRng>,
) -> TestSession {
    let stage = RecordingStage::new();
    let background = Arc::new(FakeAudioChannel::new());
    let audio = AudioDevices::new(background.clone())
        .with_meditation(Arc::new(FakeAudioChannel::new()));
    let session = OracleSession::new(
        manifest,
        SessionPorts {
            store,
            clock: Arc::new(FixedClock(
                chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            )),
            timer: Arc::new(VirtualTimer::new()),
            rng,
            stage: stage.stage(),
            audio,
        },
    );
    TestSession {
        session,
        stage,
        background,
    }
}

/// Composes a session whose RNG always lands on the first candidate.
pub fn session(manifest: SceneManifest, store: Arc<InMemoryStore>) -> TestSession {
    session_with_rng(manifest, store, Box::new(MockRng))
}
