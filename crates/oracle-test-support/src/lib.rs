//! Shared test fakes and utilities for the oracle scene engine.

mod audio;
mod clock;
mod rng;
mod stage;
mod storage;

pub use audio::{ChannelSnapshot, FakeAudioChannel};
pub use clock::{FixedClock, VirtualTimer};
pub use rng::{MockRng, SequenceRng};
pub use stage::{
    RecordingAmbient, RecordingAnimator, RecordingFacets, RecordingNavigator, RecordingStage,
};
pub use storage::{FailingStore, InMemoryStore};
