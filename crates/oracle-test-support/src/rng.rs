//! Test RNG: deterministic `DeterministicRng` implementations for tests.

use oracle_core::rng::DeterministicRng;

/// A no-op RNG that always draws `0.0`, landing on the first weighted
/// candidate. Suitable for tests that do not depend on specific random values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns unit-interval values from a predetermined sequence.
/// Panics if the sequence is exhausted. Used in tests that need a specific
/// draw (e.g., landing on a chosen slice of the weight wheel).
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values in `[0.0, 1.0)`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }

    fn next_value(&mut self) -> f64 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}

impl DeterministicRng for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        self.next_value()
    }
}
