//! Draft record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current draft record schema version.
pub const DRAFT_VERSION: u32 = 1;

/// A persisted snapshot of in-progress user input.
///
/// One record lives under one storage key. The payload is caller-defined;
/// the envelope carries the metadata needed for expiration and recovery
/// prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord<T> {
    /// Caller-defined draft contents.
    pub payload: T,
    /// When the draft was last written.
    pub last_modified: DateTime<Utc>,
    /// Schema version of the record envelope.
    pub version: u32,
}

impl<T> DraftRecord<T> {
    /// Wraps `payload` in a fresh record stamped with the current time.
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            last_modified: Utc::now(),
            version: DRAFT_VERSION,
        }
    }

    /// Time elapsed since the last edit, as seen from `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.last_modified)
    }

    /// Whether the record has outlived `retention` as seen from `now`.
    ///
    /// The boundary is inclusive: a record exactly `retention` old is
    /// expired.
    pub fn is_expired(&self, now: DateTime<Utc>, retention: chrono::Duration) -> bool {
        self.age(now) >= retention
    }

    /// Coarse human-readable age, for recovery prompts ("Resume the draft
    /// you edited 2 hours ago?").
    ///
    /// Buckets, all floor division: under a minute is "just now", under an
    /// hour is minutes, under a day is hours, and days beyond that.
    pub fn describe_age(&self, now: DateTime<Utc>) -> String {
        let age = self.age(now);
        let minutes = age.num_minutes();

        if minutes < 1 {
            return "just now".to_string();
        }
        if minutes < 60 {
            return format!("{} minute{} ago", minutes, plural(minutes));
        }

        let hours = age.num_hours();
        if hours < 24 {
            return format!("{} hour{} ago", hours, plural(hours));
        }

        let days = age.num_days();
        format!("{} day{} ago", days, plural(days))
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
