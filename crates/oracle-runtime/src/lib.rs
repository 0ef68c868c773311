//! Oracle scene engine: runtime.
//!
//! Composes every context into one [`session::OracleSession`] per page
//! session and provides headless adapters for running a scene outside the
//! browser: a JSON file standing in for local storage, a tokio timer, and
//! stage and audio collaborators that only log.

pub mod audio;
pub mod error;
pub mod manifest;
pub mod session;
pub mod settings;
pub mod stage;
pub mod storage;
pub mod telemetry;
pub mod timer;
