//! Storage trait definitions.
//!
//! These traits define the interface for client storage backends, enabling
//! swapping between the app store and the browser database without changing
//! the maintenance operations.

use async_trait::async_trait;

use crate::error::StorageResult;

/// A key-value store holding the client's cached data.
///
/// Values are opaque strings; the store never interprets them.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value stored under `key`.
    ///
    /// Removing an absent key is a no-op, not an error.
    ///
    /// # Returns
    ///
    /// `true` if a value was removed, `false` if the key was already absent.
    async fn remove(&self, key: &str) -> StorageResult<bool>;

    /// List all keys currently present in the store.
    async fn keys(&self) -> StorageResult<Vec<String>>;

    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}

/// Trait object alias for `CacheStore`.
pub type DynCacheStore = dyn CacheStore;
