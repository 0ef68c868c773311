//! Runtime settings read from the environment.

use std::path::PathBuf;

use crate::error::AppError;
use crate::telemetry::LogFormat;

/// Default storage file, relative to the working directory.
pub const DEFAULT_STORAGE_PATH: &str = "oracle-storage.json";

/// Everything the rehearsal binary needs before composing a session.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    /// Scene manifest (`ORACLE_MANIFEST`, required).
    pub manifest: PathBuf,
    /// File standing in for browser-local storage (`ORACLE_STORAGE`).
    pub storage: PathBuf,
    /// Fixed RNG seed (`ORACLE_SEED`); the OS seeds the RNG otherwise.
    pub seed: Option<u64>,
    /// Time stretch for every wait (`ORACLE_PACE`, default `1.0`).
    pub pace: f64,
    /// Log output (`ORACLE_LOG_FORMAT`).
    pub log_format: LogFormat,
}

impl RuntimeSettings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `ORACLE_MANIFEST` is unset or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `ORACLE_MANIFEST` is unset or a value
    /// does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let manifest = lookup("ORACLE_MANIFEST")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config("ORACLE_MANIFEST environment variable must be set".into()))?;

        let storage = lookup("ORACLE_STORAGE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_owned());

        let seed = lookup("ORACLE_SEED")
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .map_err(|e| AppError::Config(format!("ORACLE_SEED must be a valid u64: {e}")))
            })
            .transpose()?;

        let pace = match lookup("ORACLE_PACE") {
            Some(v) => {
                let pace = v
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| AppError::Config(format!("ORACLE_PACE must be a number: {e}")))?;
                if !pace.is_finite() || pace < 0.0 {
                    return Err(AppError::Config(
                        "ORACLE_PACE must be zero or positive".into(),
                    ));
                }
                pace
            }
            None => 1.0,
        };

        Ok(Self {
            manifest: PathBuf::from(manifest),
            storage: PathBuf::from(storage),
            seed,
            pace,
            log_format: LogFormat::parse(lookup("ORACLE_LOG_FORMAT").as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<RuntimeSettings, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        RuntimeSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_manifest_is_required() {
        let err = settings(&[]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_defaults_apply() {
        let s = settings(&[("ORACLE_MANIFEST", "scene.yaml")]).unwrap();
        assert_eq!(s.manifest, PathBuf::from("scene.yaml"));
        assert_eq!(s.storage, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(s.seed, None);
        assert!((s.pace - 1.0).abs() < f64::EPSILON);
        assert_eq!(s.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_all_values_parse() {
        let s = settings(&[
            ("ORACLE_MANIFEST", "scene.yaml"),
            ("ORACLE_STORAGE", "/tmp/store.json"),
            ("ORACLE_SEED", "42"),
            ("ORACLE_PACE", "0"),
            ("ORACLE_LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(s.seed, Some(42));
        assert!(s.pace.abs() < f64::EPSILON);
        assert_eq!(s.log_format, LogFormat::Json);
    }

    #[test]
    fn test_bad_seed_and_pace_are_rejected() {
        assert!(settings(&[("ORACLE_MANIFEST", "m"), ("ORACLE_SEED", "x")]).is_err());
        assert!(settings(&[("ORACLE_MANIFEST", "m"), ("ORACLE_PACE", "-1")]).is_err());
    }
}
