//! Database utility functions.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Format used for every `*_at` text column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Generate an 8-character hex ID for database entities
pub fn generate_entity_id() -> String {
    format!("{:08x}", OsRng.next_u32())
}

/// Get current datetime as string in SQLite format
pub fn current_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Timestamp `days` days from now, in SQLite format. Saturates at the
/// ends of the representable range.
pub fn timestamp_in_days(days: i64) -> String {
    let at = Duration::try_days(days)
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current UTC time without timezone, as stored for events.
pub fn now_naive() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Use the given value unless it is empty.
///
/// Create paths keep caller-supplied ids and timestamps (seed data, imports)
/// and generate fresh ones otherwise.
pub fn or_generate(value: &str, generate: impl FnOnce() -> String) -> String {
    if value.is_empty() {
        generate()
    } else {
        value.to_string()
    }
}
