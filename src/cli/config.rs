//! Configuration file
//!
//! A JSON object; every field is optional:
//!
//! ```json
//! { "data_file": "books.dat", "save_on_exit": true, "log_level": "warn" }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;
use crate::storage::{BookFile, DEFAULT_DATA_FILE};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the book data file
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Save once more when the menu exits
    #[serde(default = "default_save_on_exit")]
    pub save_on_exit: bool,

    /// Minimum log severity written to stderr
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}
fn default_save_on_exit() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            save_on_exit: default_save_on_exit(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// A missing file means all defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.trim().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        self.severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse::<Severity>().map_err(CliError::config_error)
    }

    /// Get data file as Path
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_file)
    }

    /// The data file this configuration points at
    pub fn book_file(&self) -> BookFile {
        BookFile::new(self.data_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&temp_dir.path().join("shelf.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_file, "books.dat");
        assert!(config.save_on_exit);
        assert_eq!(config.severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shelf.json");
        fs::write(&path, r#"{"data_file": "/var/lib/shelf/books.dat"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/var/lib/shelf/books.dat"));
        assert!(config.save_on_exit);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shelf.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "SHELF_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_empty_data_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shelf.json");
        fs::write(&path, r#"{"data_file": "  "}"#).unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shelf.json");
        fs::write(&path, r#"{"log_level": "chatty"}"#).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.message().contains("chatty"));
    }
}
