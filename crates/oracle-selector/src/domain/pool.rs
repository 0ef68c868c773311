//! Declared destination scenes and their validation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Every destination path must live under this prefix.
pub const SCENES_PATH_PREFIX: &str = "/scenes/";

/// A validated destination scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePoolEntry {
    /// Scene identifier, unique within the pool.
    pub id: String,
    /// Destination path, always under [`SCENES_PATH_PREFIX`].
    pub url: String,
    /// Relative selection weight, always finite and positive.
    pub weight: f64,
    /// Category tag, informational only.
    pub realm: String,
}

/// A weight as authored: a number, or text from page markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawWeight {
    /// Numeric weight.
    Number(f64),
    /// Textual weight, parsed leniently.
    Text(String),
}

/// A scene record exactly as declared by the content author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSceneRecord {
    /// Declared identifier.
    pub id: Option<String>,
    /// Declared destination path.
    pub url: Option<String>,
    /// Declared weight.
    pub weight: Option<RawWeight>,
    /// Declared category.
    pub realm: Option<String>,
}

/// Weight used when the declared one is missing or unusable.
pub const DEFAULT_WEIGHT: f64 = 1.0;

fn parse_weight(raw: Option<&RawWeight>) -> f64 {
    let parsed = match raw {
        Some(RawWeight::Number(n)) => Some(*n),
        Some(RawWeight::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    };
    match parsed {
        Some(w) if w.is_finite() && w > 0.0 => w,
        _ => DEFAULT_WEIGHT,
    }
}

impl RawSceneRecord {
    /// Validates this record. Returns `None` when the id is empty or the
    /// path is outside [`SCENES_PATH_PREFIX`]. A bare relative path such as
    /// `moon-gate/` is taken to mean `/scenes/moon-gate/`.
    #[must_use]
    pub fn validate(&self) -> Option<ScenePoolEntry> {
        let id = self.id.as_deref().map(str::trim).unwrap_or_default();
        let url = match self.url.as_deref().map(str::trim).unwrap_or_default() {
            "" => return None,
            absolute if absolute.starts_with('/') => absolute.to_owned(),
            relative => format!("{SCENES_PATH_PREFIX}{relative}"),
        };

        if id.is_empty() || !url.starts_with(SCENES_PATH_PREFIX) {
            return None;
        }

        Some(ScenePoolEntry {
            id: id.to_owned(),
            url,
            weight: parse_weight(self.weight.as_ref()),
            realm: self
                .realm
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_owned(),
        })
    }
}

/// Builds the scene pool from declared records, silently dropping invalid
/// ones.
#[must_use]
pub fn load_pool(records: &[RawSceneRecord]) -> Vec<ScenePoolEntry> {
    let pool: Vec<ScenePoolEntry> = records
        .iter()
        .filter_map(|record| {
            let entry = record.validate();
            if entry.is_none() {
                debug!(?record, "dropping invalid scene pool record");
            }
            entry
        })
        .collect();

    info!(
        declared = records.len(),
        valid = pool.len(),
        "scene pool loaded"
    );
    pool
}

/// Extracts the scene id from a location path such as
/// `/scenes/moon-gate/` → `moon-gate`.
#[must_use]
pub fn scene_id_from_path(path: &str) -> Option<String> {
    let start = path.find(SCENES_PATH_PREFIX)? + SCENES_PATH_PREFIX.len();
    let id = path[start..]
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    if id.is_empty() {
        None
    } else {
        Some(id.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, url: &str, weight: Option<RawWeight>) -> RawSceneRecord {
        RawSceneRecord {
            id: Some(id.to_owned()),
            url: Some(url.to_owned()),
            weight,
            realm: Some("healing".to_owned()),
        }
    }

    #[test]
    fn test_valid_record_is_kept() {
        let entry = record("moon", "/scenes/moon", Some(RawWeight::Number(2.0)))
            .validate()
            .unwrap();
        assert_eq!(entry.id, "moon");
        assert_eq!(entry.url, "/scenes/moon");
        assert!((entry.weight - 2.0).abs() < f64::EPSILON);
        assert_eq!(entry.realm, "healing");
    }

    #[test]
    fn test_records_without_id_or_outside_prefix_are_dropped() {
        let records = vec![
            record("", "/scenes/empty-id", None),
            record("elsewhere", "/blog/elsewhere", None),
            RawSceneRecord {
                id: Some("no-url".into()),
                ..RawSceneRecord::default()
            },
            record("ok", "/scenes/ok", None),
        ];
        let pool = load_pool(&records);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, "ok");
    }

    #[test]
    fn test_relative_path_is_placed_under_scenes() {
        let entry = record("moon", "moon/", None).validate().unwrap();
        assert_eq!(entry.url, "/scenes/moon/");
    }

    #[test]
    fn test_unusable_weights_default_to_one() {
        for weight in [
            None,
            Some(RawWeight::Text("heavy".into())),
            Some(RawWeight::Number(0.0)),
            Some(RawWeight::Number(-3.0)),
            Some(RawWeight::Number(f64::INFINITY)),
        ] {
            let entry = record("s", "/scenes/s", weight).validate().unwrap();
            assert!((entry.weight - DEFAULT_WEIGHT).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_textual_weight_is_parsed() {
        let entry = record("s", "/scenes/s", Some(RawWeight::Text(" 2.5 ".into())))
            .validate()
            .unwrap();
        assert!((entry.weight - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_deserializes_numeric_and_text_weights() {
        let records: Vec<RawSceneRecord> = serde_json::from_str(
            r#"[{"id":"a","url":"/scenes/a","weight":3},{"id":"b","url":"/scenes/b","weight":"0.5"}]"#,
        )
        .unwrap();
        let pool = load_pool(&records);
        assert!((pool[0].weight - 3.0).abs() < f64::EPSILON);
        assert!((pool[1].weight - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scene_id_from_path() {
        assert_eq!(scene_id_from_path("/scenes/moon-gate"), Some("moon-gate".into()));
        assert_eq!(scene_id_from_path("/scenes/moon-gate/"), Some("moon-gate".into()));
        assert_eq!(scene_id_from_path("/scenes/moon?x=1"), Some("moon".into()));
        assert_eq!(scene_id_from_path("/scenes/"), None);
        assert_eq!(scene_id_from_path("/about"), None);
    }
}
