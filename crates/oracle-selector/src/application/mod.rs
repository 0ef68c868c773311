//! Application services for the Scene Pool & Selector context.

pub mod selector;
