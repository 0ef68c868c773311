//! Clock and timer abstractions for determinism.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cooperative waiting. Cooldowns, holds and volume ramps all suspend here,
/// so tests can substitute virtual time.
#[async_trait]
pub trait Timer: Send + Sync {
    /// Completes once `duration` has elapsed.
    async fn sleep(&self, duration: Duration);
}
