//! Weighted selection of the next destination scene.
//!
//! The draw is a roulette wheel: pick a uniform value in
//! `[0, total_weight)`, then walk the candidates subtracting each weight.
//! The first candidate at which the running remainder reaches zero or below
//! wins. Equal weights therefore get equal slices of the wheel.

use oracle_core::rng::DeterministicRng;
use oracle_history::domain::history::SceneHistory;
use tracing::{debug, warn};

use super::pool::ScenePoolEntry;

/// Draws one candidate with probability proportional to its weight.
///
/// Returns `None` only for an empty candidate list. If floating-point
/// residue leaves the remainder just above zero after the walk, the last
/// candidate wins, since the draw fell at the very end of the wheel.
pub fn weighted_pick<'a>(
    candidates: &[&'a ScenePoolEntry],
    rng: &mut dyn DeterministicRng,
) -> Option<&'a ScenePoolEntry> {
    let last = *candidates.last()?;
    let total: f64 = candidates.iter().map(|c| c.weight).sum();
    let mut remainder = rng.next_f64() * total;

    for &candidate in candidates {
        remainder -= candidate.weight;
        if remainder <= 0.0 {
            return Some(candidate);
        }
    }
    Some(last)
}

/// Chooses the next destination.
///
/// Scenes in `history` and the current scene are excluded. When that leaves
/// nothing, only the current scene is excluded, so a small pool still allows
/// forward progress. Returns `None` when even that leaves nothing.
pub fn select_next(
    pool: &[ScenePoolEntry],
    current_id: Option<&str>,
    history: &SceneHistory,
    rng: &mut dyn DeterministicRng,
) -> Option<ScenePoolEntry> {
    let current_id = current_id.filter(|id| !id.is_empty());
    let is_current = |entry: &ScenePoolEntry| current_id == Some(entry.id.as_str());

    let mut candidates: Vec<&ScenePoolEntry> = pool
        .iter()
        .filter(|&entry| !is_current(entry) && !history.contains(&entry.id))
        .collect();

    if candidates.is_empty() {
        debug!(
            history = ?history.ids(),
            "every scene was visited recently, relaxing history exclusion"
        );
        candidates = pool.iter().filter(|&entry| !is_current(entry)).collect();
    }

    if candidates.is_empty() {
        warn!(
            pool_size = pool.len(),
            current = current_id.unwrap_or_default(),
            "no eligible destination scene"
        );
        return None;
    }

    let picked = weighted_pick(&candidates, rng).cloned();
    if let Some(entry) = &picked {
        debug!(scene = %entry.id, weight = entry.weight, "destination scene selected");
    }
    picked
}

#[cfg(test)]
mod tests {
    use oracle_core::rng::SeededRng;
    use oracle_test_support::{MockRng, SequenceRng};

    use super::*;

    fn entry(id: &str, weight: f64) -> ScenePoolEntry {
        ScenePoolEntry {
            id: id.to_owned(),
            url: format!("/scenes/{id}"),
            weight,
            realm: String::new(),
        }
    }

    fn pool_abc() -> Vec<ScenePoolEntry> {
        vec![entry("a", 1.0), entry("b", 1.0), entry("c", 1.0)]
    }

    #[test]
    fn test_weighted_pick_empty_returns_none() {
        assert!(weighted_pick(&[], &mut MockRng).is_none());
    }

    #[test]
    fn test_weighted_pick_zero_draw_takes_first() {
        let pool = pool_abc();
        let refs: Vec<&ScenePoolEntry> = pool.iter().collect();
        assert_eq!(weighted_pick(&refs, &mut MockRng).unwrap().id, "a");
    }

    #[test]
    fn test_weighted_pick_boundary_belongs_to_earlier_slice() {
        // Total weight 3; a draw of exactly 1.0 lands on the a/b boundary.
        let pool = pool_abc();
        let refs: Vec<&ScenePoolEntry> = pool.iter().collect();
        let mut rng = SequenceRng::new(vec![1.0 / 3.0, 0.5, 0.99]);
        assert_eq!(weighted_pick(&refs, &mut rng).unwrap().id, "a");
        assert_eq!(weighted_pick(&refs, &mut rng).unwrap().id, "b");
        assert_eq!(weighted_pick(&refs, &mut rng).unwrap().id, "c");
    }

    #[test]
    fn test_weighted_pick_respects_heavier_slice() {
        let pool = vec![entry("a", 1.0), entry("b", 1.0), entry("c", 2.0)];
        let refs: Vec<&ScenePoolEntry> = pool.iter().collect();
        // Total 4: [0,1) a, [1,2) b, [2,4) c.
        let mut rng = SequenceRng::new(vec![0.2, 0.45, 0.55, 0.95]);
        let picks: Vec<String> = (0..4)
            .map(|_| weighted_pick(&refs, &mut rng).unwrap().id.clone())
            .collect();
        assert_eq!(picks, ["a", "b", "c", "c"]);
    }

    #[test]
    fn test_weighted_distribution_converges() {
        let pool = vec![entry("a", 1.0), entry("b", 1.0), entry("c", 2.0)];
        let refs: Vec<&ScenePoolEntry> = pool.iter().collect();
        let mut rng = SeededRng::from_seed(42);
        let draws: u32 = 20_000;
        let mut heavy: u32 = 0;
        let mut first: u32 = 0;
        for _ in 0..draws {
            match weighted_pick(&refs, &mut rng).unwrap().id.as_str() {
                "c" => heavy += 1,
                "a" => first += 1,
                _ => {}
            }
        }
        let heavy_share = f64::from(heavy) / f64::from(draws);
        let first_share = f64::from(first) / f64::from(draws);
        assert!((0.47..0.53).contains(&heavy_share), "heavy share {heavy_share}");
        assert!((0.22..0.28).contains(&first_share), "first share {first_share}");
    }

    #[test]
    fn test_select_never_returns_current_with_empty_history() {
        let pool = pool_abc();
        let mut rng = SeededRng::from_seed(3);
        for _ in 0..500 {
            let picked = select_next(&pool, Some("a"), &SceneHistory::new(), &mut rng).unwrap();
            assert!(picked.id == "b" || picked.id == "c");
        }
    }

    #[test]
    fn test_select_excludes_history_and_current() {
        let pool = vec![
            entry("a", 1.0),
            entry("b", 1.0),
            entry("c", 1.0),
            entry("d", 1.0),
            entry("e", 1.0),
        ];
        let history = SceneHistory::from_ids(["b", "c"]);
        let mut rng = SeededRng::from_seed(11);
        for _ in 0..500 {
            let picked = select_next(&pool, Some("a"), &history, &mut rng).unwrap();
            assert!(picked.id == "d" || picked.id == "e", "picked {}", picked.id);
        }
    }

    #[test]
    fn test_select_relaxes_history_when_everything_was_visited() {
        let pool = pool_abc();
        let history = SceneHistory::from_ids(["b", "c"]);
        let mut rng = SeededRng::from_seed(5);
        let mut seen_b = false;
        let mut seen_c = false;
        for _ in 0..200 {
            let picked = select_next(&pool, Some("a"), &history, &mut rng).unwrap();
            assert_ne!(picked.id, "a");
            seen_b |= picked.id == "b";
            seen_c |= picked.id == "c";
        }
        assert!(seen_b && seen_c);
    }

    #[test]
    fn test_select_returns_none_when_only_current_remains() {
        let pool = vec![entry("a", 1.0)];
        assert!(select_next(&pool, Some("a"), &SceneHistory::new(), &mut MockRng).is_none());
        assert!(select_next(&[], Some("a"), &SceneHistory::new(), &mut MockRng).is_none());
    }

    #[test]
    fn test_select_ignores_missing_or_empty_current_id() {
        let pool = vec![entry("a", 1.0)];
        let picked = select_next(&pool, None, &SceneHistory::new(), &mut MockRng).unwrap();
        assert_eq!(picked.id, "a");
        let picked = select_next(&pool, Some(""), &SceneHistory::new(), &mut MockRng).unwrap();
        assert_eq!(picked.id, "a");
    }
}
