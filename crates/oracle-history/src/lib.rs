//! Oracle scene engine: Scene History.
//!
//! Remembers the last few scenes the visitor was sent to, across page
//! loads, so the selector can avoid sending them straight back.

pub mod application;
pub mod domain;
