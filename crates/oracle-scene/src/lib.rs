//! Oracle scene engine: Content Navigation & Meditation Mode.
//!
//! Steps a cursor through the scene's content blocks with a breathing
//! transition, switches between reading and meditation, and turns raw
//! pointer, wheel and touch input into the two navigation commands.

pub mod application;
pub mod domain;
