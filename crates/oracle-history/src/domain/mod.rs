//! Domain types for the Scene History context.

pub mod history;
