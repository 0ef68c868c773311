//! Oracle runtime: start-up error types.

use thiserror::Error;

/// Failures that stop the runtime before a session starts.
///
/// Once a session is running nothing is fatal; every component logs and
/// degrades instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The scene manifest is not valid YAML for a scene.
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_yaml::Error),

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage file holds invalid JSON.
    #[error("storage file error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = AppError::Config("ORACLE_MANIFEST must be set".into());
        assert_eq!(
            err.to_string(),
            "configuration error: ORACLE_MANIFEST must be set"
        );
    }

    #[test]
    fn test_yaml_error_converts_to_manifest() {
        let yaml_err = serde_yaml::from_str::<Vec<u8>>("{ not: [a list").unwrap_err();
        let err = AppError::from(yaml_err);
        assert!(matches!(err, AppError::Manifest(_)));
        assert!(err.to_string().starts_with("manifest error:"));
    }

    #[test]
    fn test_io_error_converts() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(matches!(err, AppError::Io(_)));
    }
}
