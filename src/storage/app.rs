//! App framework storage backend.
//!
//! The mobile framework's synchronous storage API keeps one file per key on
//! device. This adapter operates on that layout directly:
//!
//! ```text
//! app-storage/
//! ├── classList.json
//! ├── userInfo.json
//! └── {key}.json
//! ```
//!
//! Each file holds the raw string value, JSON-encoded. Writes take exclusive
//! `flock`s and fsync; reads take shared locks.

use std::path::PathBuf;

use async_trait::async_trait;
use fs2::FileExt;
use tokio::sync::Mutex;

use crate::config::AppStoreConfig;
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::CacheStore;

/// File-per-key store over the app framework's storage directory.
pub struct AppStore {
    /// Directory holding the value files.
    data_dir: PathBuf,
    /// Mutex for coordinating file operations within the process.
    lock: Mutex<()>,
}

impl AppStore {
    /// Open an existing app store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the storage directory does
    /// not exist. Detection relies on this: opening never creates state.
    pub fn open(config: &AppStoreConfig) -> StorageResult<Self> {
        if !config.data_dir.is_dir() {
            return Err(StorageError::Unavailable);
        }

        Ok(Self {
            data_dir: config.data_dir.clone(),
            lock: Mutex::new(()),
        })
    }

    /// Create the storage directory if needed and open it.
    ///
    /// Used when seeding a fresh development environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(config: &AppStoreConfig) -> StorageResult<Self> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| {
            StorageError::FileIO(format!(
                "Failed to create directory {:?}: {}",
                config.data_dir, e
            ))
        })?;

        Self::open(config)
    }

    /// Whether the store's on-disk location exists.
    #[must_use]
    pub fn is_present(config: &AppStoreConfig) -> bool {
        config.data_dir.is_dir()
    }

    /// Get the file path for a key.
    fn value_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", sanitize_name(key)))
    }

    /// Write a value file.
    fn write_value(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.value_path(key);

        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        file.lock_exclusive()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        serde_json::to_writer(&file, value)?;
        file.sync_all()?;
        file.unlock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        Ok(())
    }

    /// Read a value file.
    fn read_value(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.value_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let file = std::fs::File::open(&path)?;
        file.lock_shared()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        let value: String = serde_json::from_reader(&file)?;
        file.unlock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        Ok(Some(value))
    }

    /// Delete a value file.
    fn delete_value(&self, key: &str) -> StorageResult<bool> {
        let path = self.value_path(key);

        if !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(&path)?;
        Ok(true)
    }

    /// List stored keys from the directory contents.
    fn list_keys(&self) -> StorageResult<Vec<String>> {
        let mut keys = Vec::new();

        for entry in std::fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) == Some("json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[async_trait]
impl CacheStore for AppStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().await;
        self.read_value(key)
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        self.write_value(key, value)
    }

    async fn remove(&self, key: &str) -> StorageResult<bool> {
        let _guard = self.lock.lock().await;
        self.delete_value(key)
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let _guard = self.lock.lock().await;
        self.list_keys()
    }

    async fn health_check(&self) -> StorageResult<()> {
        if !self.data_dir.exists() {
            return Err(StorageError::Unavailable);
        }

        // Try to create a test file
        let test_file = self.data_dir.join(".health_check");
        tokio::fs::write(&test_file, b"ok")
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check failed: {e}")))?;
        tokio::fs::remove_file(&test_file)
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check cleanup failed: {e}")))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "app"
    }
}

/// Sanitize a key for use as a filename.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (AppStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = AppStoreConfig {
            data_dir: temp_dir.path().to_path_buf(),
        };
        let store = AppStore::open(&config).unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_open_missing_directory_fails() {
        let config = AppStoreConfig {
            data_dir: PathBuf::from("/nonexistent/app-storage"),
        };
        assert!(matches!(
            AppStore::open(&config),
            Err(StorageError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let (store, _temp) = create_test_store();

        store.set("classList", "[\"Grade 23 - Class 1\"]").await.unwrap();
        assert_eq!(
            store.get("classList").await.unwrap().as_deref(),
            Some("[\"Grade 23 - Class 1\"]")
        );

        assert!(store.remove("classList").await.unwrap());
        assert_eq!(store.get("classList").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_noop() {
        let (store, _temp) = create_test_store();
        assert!(!store.remove("currentWeek").await.unwrap());
    }

    #[tokio::test]
    async fn test_keys_sorted() {
        let (store, _temp) = create_test_store();

        store.set("userInfo", "{}").await.unwrap();
        store.set("classList", "[]").await.unwrap();

        assert_eq!(store.keys().await.unwrap(), vec!["classList", "userInfo"]);
    }

    #[tokio::test]
    async fn test_health_check() {
        let (store, _temp) = create_test_store();
        assert!(store.health_check().await.is_ok());
    }
}
