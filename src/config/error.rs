//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating `folio.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("{field} points to `{path}`, which does not exist")]
    MissingPath { field: &'static str, path: PathBuf },

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("folio.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(err.to_string(), "cannot read config `folio.toml`");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_missing_path_display() {
        let err = ConfigError::MissingPath {
            field: "[build.input]",
            path: PathBuf::from("/site/src"),
        };
        assert_eq!(
            err.to_string(),
            "[build.input] points to `/site/src`, which does not exist"
        );
    }

    #[test]
    fn test_validation_display() {
        let err = ConfigError::Validation("[base.url] must start with http".into());
        assert!(err.to_string().ends_with("[base.url] must start with http"));
    }
}
