//! Browser local-storage backend.
//!
//! Browsers persist `localStorage` as a small SQLite database with a single
//! table:
//!
//! ```text
//! ItemTable (key TEXT UNIQUE NOT NULL, value BLOB NOT NULL)
//! ```
//!
//! This adapter operates on that database through `sqlx`. Values are treated
//! as UTF-8 text.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::BrowserStoreConfig;
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::CacheStore;

/// Store over a browser's local-storage SQLite database.
pub struct BrowserStore {
    pool: SqlitePool,
}

impl BrowserStore {
    /// Open an existing local-storage database.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the database file does not
    /// exist, or a connection error if it cannot be opened.
    pub async fn open(config: &BrowserStoreConfig) -> StorageResult<Self> {
        if !config.db_path.is_file() {
            return Err(StorageError::Unavailable);
        }

        Self::connect(&config.db_path, false).await
    }

    /// Create the database (and its item table) if needed and open it.
    ///
    /// Used by tests and when preparing a fresh development environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or opened.
    pub async fn create(config: &BrowserStoreConfig) -> StorageResult<Self> {
        if let Some(parent) = config.db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let store = Self::connect(&config.db_path, true).await?;

        sqlx::query("CREATE TABLE IF NOT EXISTS ItemTable (key TEXT UNIQUE NOT NULL, value BLOB NOT NULL)")
            .execute(&store.pool)
            .await?;

        Ok(store)
    }

    /// Whether the store's on-disk database exists.
    #[must_use]
    pub fn is_present(config: &BrowserStoreConfig) -> bool {
        config.db_path.is_file()
    }

    async fn connect(path: &Path, create: bool) -> StorageResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl CacheStore for BrowserStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let row: Option<Vec<u8>> =
            sqlx::query_scalar("SELECT value FROM ItemTable WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|bytes| {
            String::from_utf8(bytes)
                .map_err(|e| StorageError::Serialization(format!("Value for '{key}' is not UTF-8: {e}")))
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        sqlx::query("INSERT OR REPLACE INTO ItemTable (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value.as_bytes())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM ItemTable WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM ItemTable ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }

    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(format!("Health check failed: {e}")))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "browser"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (BrowserStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = BrowserStoreConfig {
            db_path: temp_dir.path().join("localstorage.db"),
        };
        let store = BrowserStore::create(&config).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_open_missing_database_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = BrowserStoreConfig {
            db_path: temp_dir.path().join("absent.db"),
        };
        assert!(matches!(
            BrowserStore::open(&config).await,
            Err(StorageError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let (store, _temp) = create_test_store().await;

        store.set("currentWeek", "7").await.unwrap();
        assert_eq!(store.get("currentWeek").await.unwrap().as_deref(), Some("7"));

        assert!(store.remove("currentWeek").await.unwrap());
        assert!(!store.remove("currentWeek").await.unwrap());
        assert_eq!(store.get("currentWeek").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_replace_existing_value() {
        let (store, _temp) = create_test_store().await;

        store.set("currentClass", "{\"name\":\"A\"}").await.unwrap();
        store.set("currentClass", "{\"name\":\"B\"}").await.unwrap();

        assert_eq!(
            store.get("currentClass").await.unwrap().as_deref(),
            Some("{\"name\":\"B\"}")
        );
        assert_eq!(store.keys().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let (store, _temp) = create_test_store().await;
        assert!(store.health_check().await.is_ok());
    }
}
