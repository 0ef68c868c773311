//! The scene manifest: everything a page would declare in markup.

use std::path::Path;

use oracle_core::config::OracleConfig;
use oracle_scene::domain::blocks::ContentBlock;
use oracle_selector::domain::pool::{RawSceneRecord, scene_id_from_path};
use serde::{Deserialize, Serialize};

use crate::audio::AudioSources;
use crate::error::AppError;

/// One scene as authored.
///
/// ```yaml
/// scene_path: /scenes/forest/
/// audio:
///   background: forest.mp3
///   meditation: om.mp3
/// blocks:
///   - handle: intro
///     text: Welcome, traveller.
/// pool:
///   - { id: river, url: /scenes/river/, weight: 2, realm: water }
/// config:
///   breath: { cooldown: 0.5 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneManifest {
    /// Location of this scene; its id is read from here.
    pub scene_path: String,
    /// Declared audio sources.
    pub audio: AudioSources,
    /// Content blocks in page order, empty ones included.
    pub blocks: Vec<ContentBlock>,
    /// Candidate destinations.
    pub pool: Vec<RawSceneRecord>,
    /// Timing overrides.
    pub config: OracleConfig,
}

impl SceneManifest {
    /// Parses a manifest from YAML.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Manifest` if the YAML does not describe a scene.
    pub fn from_yaml(yaml: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read, or
    /// `AppError::Manifest` if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// The current scene's id, if the path is under `/scenes/`.
    #[must_use]
    pub fn scene_id(&self) -> Option<String> {
        scene_id_from_path(&self.scene_path)
    }
}

#[cfg(test)]
mod tests {
    use oracle_audio::domain::channel::SoundEffect;

    use super::*;

    const FOREST: &str = r"
scene_path: /scenes/forest/
audio:
  background: forest.mp3
  meditation: om.mp3
  effects:
    center_click: chime.mp3
blocks:
  - handle: intro
    text: Welcome, traveller.
  - handle: spacer
    text: '   '
  - handle: prompt0
    text: What do you carry?
pool:
  - { id: river, url: /scenes/river/, weight: 2, realm: water }
  - { id: ember, url: ember/, weight: 'heavy' }
config:
  breath:
    cooldown: 0.5
";

    #[test]
    fn test_manifest_parses_every_section() {
        let manifest = SceneManifest::from_yaml(FOREST).unwrap();
        assert_eq!(manifest.scene_id().as_deref(), Some("forest"));
        assert_eq!(manifest.audio.meditation.as_deref(), Some("om.mp3"));
        assert_eq!(
            manifest.audio.effects.get(&SoundEffect::CenterClick).map(String::as_str),
            Some("chime.mp3")
        );
        assert_eq!(manifest.blocks.len(), 3);
        assert_eq!(manifest.pool.len(), 2);
        assert!((manifest.config.breath.cooldown - 0.5).abs() < f64::EPSILON);
        assert!((manifest.config.breath.breath_in - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_manifest_is_all_defaults() {
        let manifest = SceneManifest::from_yaml("{}").unwrap();
        assert_eq!(manifest, SceneManifest::default());
        assert_eq!(manifest.scene_id(), None);
    }

    #[test]
    fn test_malformed_manifest_is_a_manifest_error() {
        let err = SceneManifest::from_yaml("blocks: 7").unwrap_err();
        assert!(matches!(err, AppError::Manifest(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = SceneManifest::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
