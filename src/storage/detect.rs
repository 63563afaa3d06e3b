//! Storage environment detection.
//!
//! Decides which client storage backend to operate on. The app store is the
//! primary environment; the browser database is the fallback. Detection only
//! probes for existing on-disk state and never creates any.

use std::sync::Arc;

use tracing::debug;

use crate::config::{StorageConfig, StoreKind};
use crate::error::StorageResult;
use crate::storage::app::AppStore;
use crate::storage::browser::BrowserStore;
use crate::storage::traits::CacheStore;

/// Detect the available storage environment.
///
/// With [`StoreKind::Auto`] the app store location is probed first, then the
/// browser database. An explicit backend choice skips probing the other.
///
/// # Returns
///
/// The opened store, or `None` when the selected environment is not present.
///
/// # Errors
///
/// Returns an error if a present backend fails to open or its health check
/// fails.
pub async fn detect_store(config: &StorageConfig) -> StorageResult<Option<Arc<dyn CacheStore>>> {
    match config.backend {
        StoreKind::App => open_app(config).await,
        StoreKind::Browser => open_browser(config).await,
        StoreKind::Auto => {
            if let Some(store) = open_app(config).await? {
                return Ok(Some(store));
            }
            open_browser(config).await
        }
    }
}

async fn open_app(config: &StorageConfig) -> StorageResult<Option<Arc<dyn CacheStore>>> {
    if !AppStore::is_present(&config.app) {
        debug!(path = ?config.app.data_dir, "App store not present");
        return Ok(None);
    }

    let store = AppStore::open(&config.app)?;
    store.health_check().await?;

    Ok(Some(Arc::new(store)))
}

async fn open_browser(config: &StorageConfig) -> StorageResult<Option<Arc<dyn CacheStore>>> {
    if !BrowserStore::is_present(&config.browser) {
        debug!(path = ?config.browser.db_path, "Browser store not present");
        return Ok(None);
    }

    let store = BrowserStore::open(&config.browser).await?;
    store.health_check().await?;

    Ok(Some(Arc::new(store)))
}
