//! The scene selector service: a validated pool plus its random source.

use std::sync::{Mutex, PoisonError};

use oracle_core::rng::DeterministicRng;
use oracle_history::domain::history::SceneHistory;
use tracing::instrument;

use crate::domain::pool::{RawSceneRecord, ScenePoolEntry, load_pool};
use crate::domain::selection::select_next;

/// Owns the scene pool for the current page and the RNG used to draw from it.
pub struct SceneSelector {
    pool: Vec<ScenePoolEntry>,
    rng: Mutex<Box<dyn DeterministicRng>>,
}

impl std::fmt::Debug for SceneSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneSelector")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl SceneSelector {
    /// Creates a selector over an already validated pool.
    #[must_use]
    pub fn new(pool: Vec<ScenePoolEntry>, rng: Box<dyn DeterministicRng>) -> Self {
        Self {
            pool,
            rng: Mutex::new(rng),
        }
    }

    /// Validates declared records and creates a selector over the survivors.
    #[must_use]
    pub fn from_records(records: &[RawSceneRecord], rng: Box<dyn DeterministicRng>) -> Self {
        Self::new(load_pool(records), rng)
    }

    /// The validated pool.
    #[must_use]
    pub fn pool(&self) -> &[ScenePoolEntry] {
        &self.pool
    }

    /// Draws the next destination, or `None` when no scene is eligible.
    #[instrument(skip(self, history), fields(pool_size = self.pool.len()))]
    pub fn select_next(
        &self,
        current_id: Option<&str>,
        history: &SceneHistory,
    ) -> Option<ScenePoolEntry> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        select_next(&self.pool, current_id, history, &mut **rng)
    }
}
