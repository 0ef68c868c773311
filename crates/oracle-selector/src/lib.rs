//! Oracle scene engine: Scene Pool & Selector.
//!
//! Validates the declared pool of destination scenes and draws the next
//! destination by weight, steering away from the current scene and the
//! visitor's recent history.

pub mod application;
pub mod domain;
