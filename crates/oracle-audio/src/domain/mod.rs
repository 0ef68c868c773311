//! Domain types for the Audio context.

pub mod channel;
pub mod preference;
