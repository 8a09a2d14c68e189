//! Relative-age buckets for feed rendering.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const WEEK: i64 = 604_800;

/// Human-readable age of a post at `now`.
///
/// Buckets are floor-divided and lower-inclusive: exactly 60 seconds reads
/// "1m ago", not "just now". A week or older renders as the calendar date.
/// A `created_at` in the future (clock skew) clamps to "just now".
pub fn relative_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - created_at).num_seconds().max(0);

    if seconds < MINUTE {
        "just now".to_string()
    } else if seconds < HOUR {
        format!("{}m ago", seconds / MINUTE)
    } else if seconds < DAY {
        format!("{}h ago", seconds / HOUR)
    } else if seconds < WEEK {
        format!("{}d ago", seconds / DAY)
    } else {
        created_at.format("%Y-%m-%d").to_string()
    }
}
