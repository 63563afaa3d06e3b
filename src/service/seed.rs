//! Sample data seeding for development environments.
//!
//! Writes the same fixture the backend's init script loads, so a freshly
//! cleaned client can be exercised without going through the app first.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use tracing::info;

use crate::config::{StorageConfig, StoreKind};
use crate::domain::{CachedUser, CourseEntry, CurrentClass, ScheduleData};
use crate::error::{AppError, Result, StorageError};
use crate::storage::app::AppStore;
use crate::storage::detect_store;
use crate::storage::traits::CacheStore;

/// Class name used throughout the sample fixture.
pub const SAMPLE_CLASS: &str = "Grade 23 - Class 1";

/// Detect (or, for an explicit app backend, create) the store and seed it.
///
/// # Errors
///
/// Returns [`AppError::NoEnvironment`] when no store is present and the
/// backend choice does not allow creating one, or a storage error if writes
/// fail.
pub async fn run(config: &StorageConfig) -> Result<()> {
    let store: Arc<dyn CacheStore> = match detect_store(config).await? {
        Some(store) => store,
        None if config.backend == StoreKind::App => {
            info!(path = ?config.app.data_dir, "Creating app store");
            Arc::new(AppStore::create(&config.app)?)
        }
        None => return Err(AppError::NoEnvironment),
    };

    seed_store(store.as_ref()).await
}

/// Write the sample fixture into an opened store.
///
/// # Errors
///
/// Returns an error if any value cannot be serialized or written.
pub async fn seed_store(store: &dyn CacheStore) -> Result<()> {
    let user = sample_user();
    store
        .set("userInfo", &to_json(&user)?)
        .await
        .map_err(AppError::Storage)?;
    info!(username = %user.username, "Sample user cached");

    let schedule = sample_schedule();
    store
        .set("scheduleData", &to_json(&schedule)?)
        .await
        .map_err(AppError::Storage)?;
    info!(
        class = SAMPLE_CLASS,
        courses = schedule.courses.len(),
        "Sample schedule cached"
    );

    store
        .set("classList", &to_json(&[SAMPLE_CLASS])?)
        .await
        .map_err(AppError::Storage)?;

    store
        .set(
            "currentClass",
            &to_json(&CurrentClass {
                name: SAMPLE_CLASS.to_string(),
            })?,
        )
        .await
        .map_err(AppError::Storage)?;

    let week = current_week_for(Local::now().date_naive());
    store
        .set("currentWeek", &week.to_string())
        .await
        .map_err(AppError::Storage)?;
    info!(week, "Current week cached");

    info!(backend = store.backend_name(), "Seeding complete");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value).map_err(StorageError::from)?)
}

fn sample_user() -> CachedUser {
    CachedUser {
        user_id: "U000000001".to_string(),
        username: "admin".to_string(),
        user_type: "admin".to_string(),
    }
}

fn sample_schedule() -> ScheduleData {
    let course = |name: &str, day: u8, slot: u8| CourseEntry {
        name: name.to_string(),
        day,
        slot,
        week_from: 1,
        week_to: 16,
    };

    ScheduleData {
        class_name: SAMPLE_CLASS.to_string(),
        courses: vec![
            course("Math", 0, 0),
            course("English", 1, 0),
            course("Science", 2, 1),
            course("History", 3, 1),
            course("Art", 4, 2),
        ],
    }
}

/// Week number for a date, counted from the most recent semester start.
///
/// Semesters start on March 1 and September 1; the result is clamped to the
/// schedule grid's 1-20 range.
#[must_use]
pub fn current_week_for(today: NaiveDate) -> u32 {
    let year = today.year();
    let semester_start = if today.month() >= 9 {
        NaiveDate::from_ymd_opt(year, 9, 1)
    } else if today.month() >= 3 {
        NaiveDate::from_ymd_opt(year, 3, 1)
    } else {
        NaiveDate::from_ymd_opt(year - 1, 9, 1)
    };

    // from_ymd_opt is infallible for the 1st of a month
    let Some(start) = semester_start else { return 1 };

    let weeks = (today - start).num_days() / 7 + 1;
    u32::try_from(weeks.clamp(1, 20)).unwrap_or(1)
}
