//! Domain models for the Reschedule client cache.
//!
//! Contains the fixed key list the client writes and typed views of the
//! cached values used by the read/write maintenance operations.

pub mod cache;
pub mod keys;

pub use cache::{CachedUser, CourseEntry, CurrentClass, ScheduleData};
pub use keys::{CLIENT_CACHE_KEYS, describe_key};
