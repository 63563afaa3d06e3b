//! The storage cleaner.
//!
//! Removes the fixed set of client cache keys from whichever storage backend
//! is present. The operation is idempotent, never reads values, and never
//! propagates an error: every failure is caught here, logged, and suppressed
//! so a cleanup pass always terminates normally.

use tracing::{error, info, warn};

use crate::config::StorageConfig;
use crate::domain::CLIENT_CACHE_KEYS;
use crate::storage::detect_store;
use crate::storage::traits::CacheStore;

/// Result of one cleanup pass, for logging and tests.
///
/// The CLI surface only exposes log output; callers never branch on this to
/// fail the process.
#[derive(Debug)]
pub enum CleanOutcome {
    /// The key list was walked to the end.
    Cleaned {
        /// Backend the keys were removed from.
        backend: &'static str,
        /// Keys that existed and were removed.
        removed: Vec<&'static str>,
        /// Keys that were already absent.
        absent: Vec<&'static str>,
    },
    /// Neither storage environment was found; nothing was touched.
    NoEnvironment,
    /// Detection or a removal failed; remaining keys were skipped.
    Failed {
        /// Description of the suppressed error.
        description: String,
    },
}

/// Remove the client cache keys from an already-opened store.
///
/// Keys are removed in their fixed order. The first failure stops the pass;
/// keys after it are left for the next run.
pub async fn clean_store(store: &dyn CacheStore) -> CleanOutcome {
    let mut removed = Vec::new();
    let mut absent = Vec::new();

    for key in CLIENT_CACHE_KEYS {
        match store.remove(key).await {
            Ok(true) => {
                info!(key, "Removed cached entry");
                removed.push(key);
            }
            Ok(false) => {
                info!(key, "Already absent");
                absent.push(key);
            }
            Err(err) => {
                error!(key, error = %err, "Cache cleanup failed");
                return CleanOutcome::Failed {
                    description: err.to_string(),
                };
            }
        }
    }

    info!(
        backend = store.backend_name(),
        removed = removed.len(),
        "Client cache cleanup complete"
    );
    info!("Restart or refresh the client to pick up the cleared state");

    CleanOutcome::Cleaned {
        backend: store.backend_name(),
        removed,
        absent,
    }
}

/// Run a full cleanup pass: detect the environment, then clean it.
///
/// This is the one place errors are caught. Whatever happens, the pass
/// finishes without returning an error to the caller.
pub async fn run(config: &StorageConfig) -> CleanOutcome {
    info!("Cleaning client cache");

    match detect_store(config).await {
        Ok(Some(store)) => clean_store(store.as_ref()).await,
        Ok(None) => {
            warn!("No recognized storage environment");
            CleanOutcome::NoEnvironment
        }
        Err(err) => {
            error!(error = %err, "Cache cleanup failed");
            CleanOutcome::Failed {
                description: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::config::{AppStoreConfig, BrowserStoreConfig, StoreKind};
    use crate::error::{StorageError, StorageResult};
    use crate::storage::MemoryStore;

    /// Store whose `remove` fails for one specific key.
    struct FailingStore {
        inner: MemoryStore,
        fail_on: &'static str,
    }

    #[async_trait]
    impl CacheStore for FailingStore {
        async fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> StorageResult<bool> {
            if key == self.fail_on {
                return Err(StorageError::Query("simulated removal failure".to_string()));
            }
            self.inner.remove(key).await
        }

        async fn keys(&self) -> StorageResult<Vec<String>> {
            self.inner.keys().await
        }

        async fn health_check(&self) -> StorageResult<()> {
            Ok(())
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    fn populated_store() -> MemoryStore {
        MemoryStore::with_entries(CLIENT_CACHE_KEYS.map(|key| (key, "{}")))
    }

    #[tokio::test]
    async fn test_removes_all_keys_and_nothing_else() {
        let store = populated_store();
        store.set("themePreference", "dark").await.unwrap();

        let outcome = clean_store(&store).await;

        match outcome {
            CleanOutcome::Cleaned {
                removed, absent, ..
            } => {
                assert_eq!(removed, CLIENT_CACHE_KEYS.to_vec());
                assert!(absent.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        // Unmanaged keys are untouched.
        assert_eq!(store.keys().await.unwrap(), vec!["themePreference"]);
    }

    #[tokio::test]
    async fn test_absent_keys_are_reported_not_errored() {
        let store = MemoryStore::with_entries([("userInfo", "{}")]);

        let outcome = clean_store(&store).await;

        match outcome {
            CleanOutcome::Cleaned {
                removed, absent, ..
            } => {
                assert_eq!(removed, vec!["userInfo"]);
                assert_eq!(absent.len(), CLIENT_CACHE_KEYS.len() - 1);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let store = populated_store();

        clean_store(&store).await;
        let outcome = clean_store(&store).await;

        match outcome {
            CleanOutcome::Cleaned {
                removed, absent, ..
            } => {
                assert!(removed.is_empty());
                assert_eq!(absent, CLIENT_CACHE_KEYS.to_vec());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failure_stops_the_pass_and_is_suppressed() {
        // "scheduleData" is third in the key order; the two keys after it
        // must be skipped.
        let store = FailingStore {
            inner: populated_store(),
            fail_on: "scheduleData",
        };

        let outcome = clean_store(&store).await;

        match outcome {
            CleanOutcome::Failed { description } => {
                assert!(description.contains("simulated removal failure"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        assert_eq!(store.inner.get("classList").await.unwrap(), None);
        assert!(store.inner.get("currentClass").await.unwrap().is_some());
        assert!(store.inner.get("currentWeek").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_no_environment_detected() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StoreKind::Auto,
            app: AppStoreConfig {
                data_dir: temp_dir.path().join("missing-app"),
            },
            browser: BrowserStoreConfig {
                db_path: temp_dir.path().join("missing.db"),
            },
        };

        let outcome = run(&config).await;
        assert!(matches!(outcome, CleanOutcome::NoEnvironment));
    }
}
