//! Oracle scene engine: Divination Sequencer.
//!
//! Commits the visitor to a randomly drawn next scene: picks a destination,
//! records where they came from, plays the ritual and leaves the page.

pub mod application;
pub mod domain;
