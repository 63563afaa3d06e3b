//! The fixed set of cache keys the Reschedule client persists.

/// Keys the client app writes to its local storage, in removal order.
///
/// The cleaner deletes exactly these; anything else in the store belongs to
/// other parts of the app and is left untouched.
pub const CLIENT_CACHE_KEYS: [&str; 5] = [
    "classList",
    "userInfo",
    "scheduleData",
    "currentClass",
    "currentWeek",
];

/// Human-readable description of a known cache key.
///
/// Returns `None` for keys the maintenance tool does not manage.
#[must_use]
pub fn describe_key(key: &str) -> Option<&'static str> {
    match key {
        "classList" => Some("cached class list"),
        "userInfo" => Some("signed-in user info"),
        "scheduleData" => Some("cached weekly schedule"),
        "currentClass" => Some("selected class"),
        "currentWeek" => Some("selected week number"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_described() {
        for key in CLIENT_CACHE_KEYS {
            assert!(describe_key(key).is_some(), "missing description for {key}");
        }
    }

    #[test]
    fn test_unknown_key_not_described() {
        assert!(describe_key("themePreference").is_none());
    }
}
