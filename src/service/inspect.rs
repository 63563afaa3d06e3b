//! Read-only view of the cached client data.
//!
//! Prints each managed key's presence and a typed summary where the stored
//! value parses. Never modifies the store.

use tracing::warn;

use crate::config::StorageConfig;
use crate::domain::{CLIENT_CACHE_KEYS, CachedUser, CurrentClass, ScheduleData, describe_key};
use crate::error::{AppError, Result};
use crate::storage::detect_store;
use crate::storage::traits::CacheStore;

/// Detect the storage environment and print its contents.
///
/// # Errors
///
/// Returns an error if a present backend fails while being read.
pub async fn run(config: &StorageConfig) -> Result<()> {
    let Some(store) = detect_store(config).await? else {
        warn!("No recognized storage environment");
        return Ok(());
    };

    inspect_store(store.as_ref()).await
}

/// Print the managed keys, then any unmanaged ones, from an opened store.
///
/// # Errors
///
/// Returns an error if the store fails while being read.
pub async fn inspect_store(store: &dyn CacheStore) -> Result<()> {
    println!("=== Client cache ({}) ===", store.backend_name());

    for key in CLIENT_CACHE_KEYS {
        let label = describe_key(key).unwrap_or(key);

        match store.get(key).await.map_err(AppError::Storage)? {
            None => println!("{key}: absent"),
            Some(value) => println!("{key}: {} ({label})", summarize(key, &value)),
        }
    }

    let unmanaged: Vec<String> = store
        .keys()
        .await
        .map_err(AppError::Storage)?
        .into_iter()
        .filter(|key| !CLIENT_CACHE_KEYS.contains(&key.as_str()))
        .collect();

    if !unmanaged.is_empty() {
        println!("\n=== Unmanaged keys ===");
        for key in unmanaged {
            println!("{key}");
        }
    }

    Ok(())
}

/// Render a stored value as a one-line summary.
///
/// Falls back to the raw size when the value does not parse as the shape the
/// client normally writes.
fn summarize(key: &str, value: &str) -> String {
    let parsed = match key {
        "userInfo" => serde_json::from_str::<CachedUser>(value)
            .map(|user| format!("user {} ({})", user.username, user.user_type))
            .ok(),
        "scheduleData" => serde_json::from_str::<ScheduleData>(value)
            .map(|schedule| {
                format!(
                    "{}, {} course(s)",
                    schedule.class_name,
                    schedule.courses.len()
                )
            })
            .ok(),
        "classList" => serde_json::from_str::<Vec<String>>(value)
            .map(|classes| format!("{} class(es)", classes.len()))
            .ok(),
        "currentClass" => serde_json::from_str::<CurrentClass>(value)
            .map(|class| class.name)
            .ok(),
        "currentWeek" => value.trim().parse::<u32>().map(|week| format!("week {week}")).ok(),
        _ => None,
    };

    parsed.unwrap_or_else(|| format!("{} byte(s)", value.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::storage::MemoryStore;

    #[test]
    fn test_summarize_typed_values() {
        assert_eq!(
            summarize(
                "userInfo",
                r#"{"userId":"U000000001","username":"admin","userType":"admin"}"#
            ),
            "user admin (admin)"
        );
        assert_eq!(
            summarize("classList", r#"["Grade 23 - Class 1"]"#),
            "1 class(es)"
        );
        assert_eq!(summarize("currentWeek", "7"), "week 7");
    }

    #[test]
    fn test_summarize_falls_back_to_size() {
        assert_eq!(summarize("userInfo", "not json"), "8 byte(s)");
    }

    #[tokio::test]
    async fn test_inspect_does_not_modify_store() {
        let store = MemoryStore::with_entries([("userInfo", "{}"), ("themePreference", "dark")]);

        inspect_store(&store).await.unwrap();

        assert_eq!(store.len(), 2);
    }
}
