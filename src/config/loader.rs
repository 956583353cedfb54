//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::PresenterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<PresenterConfig, ConfigError> {
    let config: PresenterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<PresenterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::debug!(path = %path.display(), "Presenter configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let config = parse_config("script_path = \"/app/index.cgi\"").unwrap();
        assert_eq!(config.script_path, "/app/index.cgi");
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("canonical_redirect = \"maybe\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = parse_config("script_path = \"x\"\najax_header = \"a b\"").unwrap_err();
        let message = err.to_string();

        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("script_path"));
        assert!(message.contains("ajax_header"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("micro_presenter_loader_test.toml");
        fs::write(&path, "canonical_redirect = false\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(!config.canonical_redirect);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_error_sources() {
        use std::error::Error as _;

        let err = parse_config("canonical_redirect = \"maybe\"").unwrap_err();
        assert!(err.to_string().starts_with("Parse error: "));
        assert!(err.source().is_some());

        let err = parse_config("script_path = \"x\"").unwrap_err();
        assert!(err.source().is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/no/such/presenter.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
