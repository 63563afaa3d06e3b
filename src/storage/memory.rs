//! In-memory storage backend.
//!
//! Backs unit tests and the failure-injection wrappers; never selected by
//! environment detection.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StorageResult;
use crate::storage::traits::CacheStore;

/// In-memory key-value store.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.entries.insert(key.into(), value.into());
        }
        store
    }

    /// Number of entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_entries() {
        let store = MemoryStore::with_entries([("userInfo", "{}"), ("currentWeek", "3")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("currentWeek").await.unwrap().as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_remove_reports_presence() {
        let store = MemoryStore::with_entries([("classList", "[]")]);
        assert!(store.remove("classList").await.unwrap());
        assert!(!store.remove("classList").await.unwrap());
        assert!(store.is_empty());
    }
}
