//! Store configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs as tokio_fs;
use tracing::{debug, error};

use crate::{
    constants::{DEFAULT_APP_CONFIG_INDEX, DEFAULT_APP_INDEX, DEFAULT_SETTINGS_INDEX},
    validation::validate_index_name,
    AppConfError,
    Result,
};

/// Names of the indexes the configuration store reads and writes.
///
/// Missing fields in a configuration file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Index holding application documents.
    pub app_index:        String,
    /// Index holding per-server application configuration documents.
    pub app_config_index: String,
    /// Index holding global settings.
    pub settings_index:   String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            app_index:        DEFAULT_APP_INDEX.to_owned(),
            app_config_index: DEFAULT_APP_CONFIG_INDEX.to_owned(),
            settings_index:   DEFAULT_SETTINGS_INDEX.to_owned(),
        }
    }
}

impl StoreConfig {
    /// Loads and validates a configuration from a JSON file.
    pub async fn load<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        debug!("Loading store configuration from {:?}", path);
        let content = tokio_fs::read_to_string(path).await.map_err(|e| {
            error!("Failed to read store configuration {:?}: {}", path, e);
            e
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AppConfError::ConfigError {
                message: format!("cannot parse {}: {}", path.display(), e),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every index name is valid and that no two entities share an index.
    pub fn validate(&self) -> Result<()> {
        let indexes = [
            &self.app_index,
            &self.app_config_index,
            &self.settings_index,
        ];
        for index in indexes {
            validate_index_name(index)?;
        }
        if self.app_index == self.app_config_index ||
            self.app_index == self.settings_index ||
            self.app_config_index == self.settings_index
        {
            return Err(AppConfError::ConfigError {
                message: "applications, server configs and settings need distinct indexes".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StoreConfig::default();
        assert_eq!(config.app_index, "applications");
        assert_eq!(config.app_config_index, "app-server-configs");
        assert_eq!(config.settings_index, "global-settings");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_shared_index_is_rejected() {
        let config = StoreConfig {
            settings_index: "applications".to_owned(),
            ..StoreConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppConfError::ConfigError { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("store.json");
        tokio_fs::write(&path, r#"{"app_index": "apps-v2"}"#).await.unwrap();
        let config = StoreConfig::load(&path).await.unwrap();
        assert_eq!(config.app_index, "apps-v2");
        assert_eq!(config.settings_index, "global-settings");
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_names() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("store.json");
        tokio_fs::write(&path, r#"{"app_index": "../apps"}"#).await.unwrap();
        assert!(StoreConfig::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("store.json");
        tokio_fs::write(&path, "{").await.unwrap();
        assert!(matches!(
            StoreConfig::load(&path).await,
            Err(AppConfError::ConfigError { .. })
        ));
    }
}
