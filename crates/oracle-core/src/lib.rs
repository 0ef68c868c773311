//! Oracle Core: shared ports and primitives.
//!
//! This crate defines the collaborator traits (time, randomness, storage,
//! audio channels, visual stage) and the configuration that every scene
//! context depends on. It contains no infrastructure code.

pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod rng;
pub mod stage;
pub mod storage;
