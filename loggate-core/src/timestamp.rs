use crate::model::LogEntry;
use chrono::{DateTime, SecondsFormat, Utc};

/// RFC 3339 rendering used for filled-in timestamps, e.g. `2024-03-07T10:15:00Z`.
pub fn rfc3339(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl LogEntry {
    /// Fill an empty `timestamp` with `now`. A caller-supplied value is kept
    /// as-is, even if it is not a valid timestamp.
    pub fn normalize_timestamp(&mut self, now: DateTime<Utc>) {
        if self.timestamp.is_empty() {
            self.timestamp = rfc3339(now);
        }
    }
}
