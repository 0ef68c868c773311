//! Bounded, ordered list of recently visited scenes.

use serde::{Deserialize, Serialize};

/// Maximum number of scene ids remembered.
pub const SCENE_HISTORY_LIMIT: usize = 3;

/// Recently visited scene ids, oldest first, never longer than
/// [`SCENE_HISTORY_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneHistory {
    ids: Vec<String>,
}

impl SceneHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from ids in visit order, keeping only the most
    /// recent ones.
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::new();
        for id in ids {
            history.push(id);
        }
        history
    }

    /// Appends `id`, dropping the oldest entry once the bound is exceeded.
    /// Repeats are kept; only the bound limits the list.
    pub fn push(&mut self, id: impl Into<String>) {
        self.ids.push(id.into());
        if self.ids.len() > SCENE_HISTORY_LIMIT {
            let excess = self.ids.len() - SCENE_HISTORY_LIMIT;
            self.ids.drain(..excess);
        }
    }

    /// Returns `true` if `id` is remembered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    /// The remembered ids, oldest first.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of remembered ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_at_most_three_most_recent() {
        let mut history = SceneHistory::new();
        for id in ["a", "b", "c", "d", "e"] {
            history.push(id);
            assert!(history.len() <= SCENE_HISTORY_LIMIT);
        }
        assert_eq!(history.ids(), ["c", "d", "e"]);
    }

    #[test]
    fn test_repeated_ids_are_not_deduplicated() {
        let history = SceneHistory::from_ids(["a", "a", "a", "a"]);
        assert_eq!(history.ids(), ["a", "a", "a"]);
    }

    #[test]
    fn test_from_ids_truncates_oldest() {
        let history = SceneHistory::from_ids(["w", "x", "y", "z"]);
        assert_eq!(history.ids(), ["x", "y", "z"]);
        assert!(!history.contains("w"));
        assert!(history.contains("z"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let history = SceneHistory::from_ids(["a", "b"]);
        assert_eq!(serde_json::to_string(&history).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_history_always_equals_last_three_recorded() {
        let recorded: Vec<String> = (0..20).map(|i| format!("scene-{}", i % 7)).collect();
        let mut history = SceneHistory::new();
        for (n, id) in recorded.iter().enumerate() {
            history.push(id.clone());
            let start = (n + 1).saturating_sub(SCENE_HISTORY_LIMIT);
            assert_eq!(history.ids(), &recorded[start..=n]);
        }
    }
}
