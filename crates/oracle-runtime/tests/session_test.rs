//! Integration tests for the composed oracle session.

mod common;

use std::sync::Arc;

use oracle_core::rng::SeededRng;
use oracle_core::storage::{AUDIO_STATE_KEY, SCENE_HISTORY_KEY};
use oracle_divination::domain::outcome::DivinationOutcome;
use oracle_test_support::InMemoryStore;

#[tokio::test(start_paused = true)]
async fn test_rehearsal_walks_scene_and_navigates() {
    let store = Arc::new(InMemoryStore::new());
    let t = common::session(common::manifest("forest", &["forest", "river", "ember"]), store.clone());

    let outcome = t.session.rehearse().await;

    let destination = outcome.destination().expect("a destination");
    assert_ne!(destination.id, "forest");
    assert_eq!(t.stage.navigator.visited(), [destination.url.clone()]);
    assert_eq!(store.raw(SCENE_HISTORY_KEY).as_deref(), Some(r#"["forest"]"#));
    assert!(!t.session.divination().is_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_history_steers_a_chain_of_sessions() {
    let store = Arc::new(InMemoryStore::new());
    let pool = ["a", "b", "c", "d"];
    let mut current = "a".to_owned();
    let mut visited = Vec::new();

    for _ in 0..4 {
        let t = common::session(common::manifest(&current, &pool), store.clone());
        let outcome = t.session.rehearse().await;
        current = outcome.destination().unwrap().id.clone();
        visited.push(current.clone());
    }

    // Recent scenes are skipped until the pool runs out, then only the
    // current scene is excluded.
    assert_eq!(visited, ["b", "c", "d", "a"]);
    assert_eq!(
        store.raw(SCENE_HISTORY_KEY).as_deref(),
        Some(r#"["b","c","d"]"#)
    );
}

#[tokio::test(start_paused = true)]
async fn test_pool_without_alternatives_degrades_silently() {
    let store = Arc::new(InMemoryStore::new());
    let t = common::session(common::manifest("solo", &["solo"]), store.clone());

    assert_eq!(t.session.rehearse().await, DivinationOutcome::NoDestination);
    assert!(t.stage.navigator.visited().is_empty());
    assert!(store.raw(SCENE_HISTORY_KEY).is_none());
    assert!(t.session.controller().navigation_state().in_meditation);
}

#[tokio::test(start_paused = true)]
async fn test_audio_preference_carries_to_next_scene() {
    let store = Arc::new(InMemoryStore::new());

    let first = common::session(common::manifest("a", &["a", "b"]), store.clone());
    first.session.init().await;
    assert!(first.background.snapshot().paused);
    assert!(first.session.audio().toggle().await);
    first.session.teardown();
    assert!(store.raw(AUDIO_STATE_KEY).unwrap().contains(r#""isPlaying":true"#));

    let second = common::session(common::manifest("b", &["a", "b"]), store.clone());
    second.session.init().await;
    let background = second.background.snapshot();
    assert!(!background.paused);
    assert_eq!(background.source.as_deref(), Some("b.mp3"));
    assert!(second.session.audio().is_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_first_visit_starts_silent() {
    let store = Arc::new(InMemoryStore::new());
    let t = common::session(common::manifest("a", &["a", "b"]), store.clone());
    t.session.init().await;
    assert!(t.background.snapshot().paused);
    assert!(!t.session.audio().is_enabled());
    assert!(t.session.controller().navigation_state().scene_entry_complete);
}

#[tokio::test(start_paused = true)]
async fn test_seeded_rehearsals_are_reproducible() {
    let pool = ["home", "one", "two", "three", "four", "five"];
    let mut picks = Vec::new();
    for _ in 0..2 {
        let t = common::session_with_rng(
            common::manifest("home", &pool),
            Arc::new(InMemoryStore::new()),
            Box::new(SeededRng::from_seed(7)),
        );
        let outcome = t.session.rehearse().await;
        picks.push(outcome.destination().unwrap().id.clone());
    }
    assert_eq!(picks[0], picks[1]);
    assert_ne!(picks[0], "home");
}
