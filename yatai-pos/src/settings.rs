//! Application settings
//!
//! One JSON file with an explicit load/save lifecycle. The API base URL
//! is the only setting; it is read once at startup (or on an explicit
//! settings change) and injected into the client, never looked up
//! ambiently per request.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use yatai_client::config::DEFAULT_BASE_URL;

/// Environment variable overriding the default API base URL
pub const BASE_URL_ENV: &str = "YATAI_API_BASE_URL";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "YATAI_DATA_DIR";

/// Settings file name inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Settings error type
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persisted application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Backend API base URL, including the version prefix
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        let api_base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self { api_base_url }
    }
}

impl Settings {
    /// Load settings from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Data directory for settings and logs
pub fn data_dir() -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"))
}

/// Settings file path inside the data directory
pub fn settings_file(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_yields_default() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(dir.path());

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(dir.path());

        let settings = Settings {
            api_base_url: "https://pos.example.com/api/v1".to_string(),
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_settings_serialize_camel_case() {
        let settings = Settings {
            api_base_url: "http://localhost:8080/api/v1".to_string(),
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"apiBaseUrl": "http://localhost:8080/api/v1"})
        );
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(dir.path());
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(SettingsError::Parse(_))
        ));
    }
}
