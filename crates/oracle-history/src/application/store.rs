//! Persistence of the scene history in browser-local storage.

use std::sync::Arc;

use oracle_core::storage::{KeyValueStore, SCENE_HISTORY_KEY};
use tracing::{debug, instrument, warn};

use crate::domain::history::SceneHistory;

/// Reads and appends to the persisted scene history.
///
/// Storage is never the source of truth for the current scene; it only
/// remembers where the visitor has been.
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore").finish_non_exhaustive()
    }
}

impl HistoryStore {
    /// Creates a history store over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the remembered scene ids, oldest first.
    ///
    /// Never fails: unavailable storage or an unreadable slot yields an
    /// empty history, and non-string entries are discarded.
    #[must_use]
    pub fn get_history(&self) -> SceneHistory {
        let raw = match self.store.get(SCENE_HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SceneHistory::new(),
            Err(e) => {
                warn!(error = %e, "could not read scene history");
                return SceneHistory::new();
            }
        };

        match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(values) => {
                let ids = values.into_iter().filter_map(|value| match value {
                    serde_json::Value::String(id) if !id.is_empty() => Some(id),
                    other => {
                        debug!(entry = %other, "discarding corrupt scene history entry");
                        None
                    }
                });
                SceneHistory::from_ids(ids)
            }
            Err(e) => {
                warn!(error = %e, "scene history is corrupt, starting fresh");
                SceneHistory::new()
            }
        }
    }

    /// Appends `id` to the persisted history, keeping the most recent three.
    /// A failed write is logged and otherwise ignored.
    #[instrument(skip(self))]
    pub fn record(&self, id: &str) {
        let mut history = self.get_history();
        history.push(id);

        let write = serde_json::to_string(&history)
            .map_err(oracle_core::error::DomainError::from)
            .and_then(|json| self.store.set(SCENE_HISTORY_KEY, &json));

        match write {
            Ok(()) => debug!(history = ?history.ids(), "scene history updated"),
            Err(e) => warn!(error = %e, "could not save scene history"),
        }
    }
}
