//! Application services for the Audio context.

pub mod orchestrator;
