//! Typed views of the values the client caches under each key.
//!
//! The client serializes these as camelCase JSON. The cleaner never reads
//! them; `inspect` and `seed` do.

use serde::{Deserialize, Serialize};

/// Cached profile of the signed-in user (`userInfo`).
///
/// The client never caches the password, only the identifying fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedUser {
    /// Stable user identifier.
    pub user_id: String,

    /// Login name.
    pub username: String,

    /// Role, e.g. "admin" or "viewer".
    #[serde(default = "default_user_type")]
    pub user_type: String,
}

fn default_user_type() -> String {
    "viewer".to_string()
}

/// One course placement within a weekly schedule grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEntry {
    /// Course name.
    pub name: String,

    /// Day column (0 = Monday .. 6 = Sunday).
    pub day: u8,

    /// Time-slot row within the day (0-4).
    pub slot: u8,

    /// First week this course runs (1-20).
    pub week_from: u8,

    /// Last week this course runs (1-20).
    pub week_to: u8,
}

/// Cached schedule for one class (`scheduleData`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleData {
    /// Display name of the class this schedule belongs to.
    pub class_name: String,

    /// Course placements.
    pub courses: Vec<CourseEntry>,
}

/// Currently selected class (`currentClass`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentClass {
    /// Display name of the class.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_round_trip_camel_case() {
        let json = r#"{"userId":"U000000001","username":"admin","userType":"admin"}"#;
        let user: CachedUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, "U000000001");
        assert_eq!(user.user_type, "admin");

        let back = serde_json::to_string(&user).unwrap();
        assert!(back.contains("\"userId\""));
    }

    #[test]
    fn test_user_type_defaults_to_viewer() {
        let json = r#"{"userId":"U000000002","username":"guest"}"#;
        let user: CachedUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_type, "viewer");
    }

    #[test]
    fn test_schedule_data_parses() {
        let json = r#"{
            "className": "Grade 23 - Class 1",
            "courses": [
                {"name": "Math", "day": 0, "slot": 0, "weekFrom": 1, "weekTo": 16}
            ]
        }"#;
        let schedule: ScheduleData = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.class_name, "Grade 23 - Class 1");
        assert_eq!(schedule.courses.len(), 1);
        assert_eq!(schedule.courses[0].week_to, 16);
    }
}
