//! Wall-clock timer on tokio.

use std::time::Duration;

use async_trait::async_trait;
use oracle_core::clock::Timer;
use oracle_core::config::secs;

/// Sleeps on tokio's clock, stretched by a pace factor.
///
/// A pace of `1.0` is real time; `0.0` skips every wait, which makes a
/// rehearsal finish instantly.
#[derive(Debug, Clone, Copy)]
pub struct TokioTimer {
    pace: f64,
}

impl Default for TokioTimer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TokioTimer {
    /// Creates a timer. Negative or non-finite paces count as zero.
    #[must_use]
    pub fn new(pace: f64) -> Self {
        let pace = if pace.is_finite() && pace > 0.0 { pace } else { 0.0 };
        Self { pace }
    }

    /// The duration actually waited for a requested `duration`, capped like
    /// any authored wait.
    #[must_use]
    pub fn scaled(&self, duration: Duration) -> Duration {
        secs(duration.as_secs_f64() * self.pace)
    }
}

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        let wait = self.scaled(duration);
        if wait.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(wait).await;
        }
    }
}
