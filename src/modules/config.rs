use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modules::email::smtp::SmtpSettings;
use crate::{ACCOUNTS_FILE, VENUES_FILE};

/// Errors surfaced while reading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Listener and link-building settings
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerSettings {
    // Address the HTTP listener binds to
    pub bind_addr: String,
    // External base URL used in confirmation links
    pub public_origin: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: "127.0.0.1:8080".to_string(),
            public_origin: "http://localhost:8080".to_string(),
        }
    }
}

/// Storage file locations
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StorageSettings {
    pub accounts_file: String,
    pub venues_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            accounts_file: ACCOUNTS_FILE.to_string(),
            venues_file: VENUES_FILE.to_string(),
        }
    }
}

/// Top-level application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    // Absent means notifications are logged instead of delivered
    pub smtp: Option<SmtpSettings>,
}

impl AppConfig {
    /// Function to load configuration from a JSON file, falling back to
    /// defaults when the file does not exist
    pub async fn load(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
        match tokio::fs::read_to_string(path.as_ref()).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Configuration file {} not found, using defaults",
                    path.as_ref().display()
                );
                Ok(AppConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_configuration() {
        let config = AppConfig::default();

        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.server.public_origin, "http://localhost:8080");
        assert_eq!(config.storage.accounts_file, ACCOUNTS_FILE);
        assert_eq!(config.storage.venues_file, VENUES_FILE);
        assert!(config.smtp.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("definitely-not-present.json").await.unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
    }

    #[tokio::test]
    async fn test_partial_file_fills_in_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{
                "server": {"bind_addr": "0.0.0.0:9000"},
                "smtp": {"host": "smtp.example.com", "username": "u", "password": "p"}
            }"#,
        )
        .unwrap();

        let config = AppConfig::load(file.path()).await.unwrap();

        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        // Unset fields keep their defaults
        assert_eq!(config.server.public_origin, "http://localhost:8080");
        assert_eq!(config.storage.accounts_file, ACCOUNTS_FILE);

        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 587);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "not json at all").unwrap();

        let result = AppConfig::load(file.path()).await;
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
