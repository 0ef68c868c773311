//! Oracle scene engine: Audio Orchestrator.
//!
//! Sole owner of the scene's audio channels. Crossfades between the
//! background and meditation beds, ducks the active bed under short cues,
//! and persists the visitor's audio on/off preference.

pub mod application;
pub mod domain;
