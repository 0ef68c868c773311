//! Domain types for the Scene Pool & Selector context.

pub mod pool;
pub mod selection;
