//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::MockConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MockConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_config(content: &str) -> Result<MockConfig, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "ben10-mock-{}-{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let path = write_temp(
            "valid",
            r#"
            [listener]
            host = "0.0.0.0"
            port = 8000
            fallback_port = 8001

            [limits]
            max_body_size = 1024
            "#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.primary_address(), "0.0.0.0:8000");
        assert_eq!(config.listener.fallback_port, Some(8001));
        assert_eq!(config.limits.max_body_size, 1024);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("ben10-mock-does-not-exist.toml");
        assert!(matches!(load_config(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_bad_syntax_is_parse_error() {
        let path = write_temp("syntax", "[listener\nport = ");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let path = write_temp("invalid", "[listener]\nport = 0\n");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e == &vec![ValidationError::ZeroPort]));
        assert!(err.to_string().contains("listener.port must not be 0"));
        let _ = fs::remove_file(path);
    }
}
