//! Test clock and timer: deterministic `Clock` and `Timer` implementations.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use oracle_core::clock::{Clock, Timer};

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A timer on tokio's clock that records every requested wait.
///
/// Run tests with `#[tokio::test(start_paused = true)]` so the waits pass
/// in virtual time.
#[derive(Debug, Default)]
pub struct VirtualTimer {
    requested: Mutex<Vec<Duration>>,
}

impl VirtualTimer {
    /// Creates a timer with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every duration passed to `sleep`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested(&self) -> Vec<Duration> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Timer for VirtualTimer {
    async fn sleep(&self, duration: Duration) {
        self.requested.lock().unwrap().push(duration);
        tokio::time::sleep(duration).await;
    }
}
