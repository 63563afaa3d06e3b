//! Storage configuration.

use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;

/// Which client storage backend to operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Probe for the app store first, then the browser database.
    #[default]
    Auto,
    /// The app framework's on-device key-value store.
    App,
    /// A browser local-storage SQLite database.
    Browser,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::App => write!(f, "app"),
            Self::Browser => write!(f, "browser"),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Storage backend selection.
    #[serde(default)]
    pub backend: StoreKind,

    /// App store configuration.
    #[serde(default)]
    pub app: AppStoreConfig,

    /// Browser store configuration.
    #[serde(default)]
    pub browser: BrowserStoreConfig,
}

impl StorageConfig {
    /// Validate the storage configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if required paths are missing for the selected backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.backend {
            StoreKind::Auto => {
                if self.app.data_dir.as_os_str().is_empty()
                    && self.browser.db_path.as_os_str().is_empty()
                {
                    return Err(ConfigError::Message(
                        "storage.app.data_dir and storage.browser.db_path cannot both be empty"
                            .to_string(),
                    ));
                }
                Ok(())
            }
            StoreKind::App => {
                if self.app.data_dir.as_os_str().is_empty() {
                    return Err(ConfigError::Message(
                        "storage.app.data_dir cannot be empty".to_string(),
                    ));
                }
                Ok(())
            }
            StoreKind::Browser => {
                if self.browser.db_path.as_os_str().is_empty() {
                    return Err(ConfigError::Message(
                        "storage.browser.db_path cannot be empty".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// App store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppStoreConfig {
    /// Directory holding the app's key-value storage files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/app-storage")
}

impl Default for AppStoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Browser store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserStoreConfig {
    /// Path to the browser's local-storage SQLite database.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/localstorage.db")
}

impl Default for BrowserStoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_kind_display() {
        assert_eq!(StoreKind::Auto.to_string(), "auto");
        assert_eq!(StoreKind::App.to_string(), "app");
        assert_eq!(StoreKind::Browser.to_string(), "browser");
    }

    #[test]
    fn test_storage_config_validation() {
        let config = StorageConfig::default();
        assert!(config.validate().is_ok());

        let mut config = StorageConfig::default();
        config.backend = StoreKind::Browser;
        config.browser.db_path = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
