use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Prefix shared by every daily log index.
pub const INDEX_PREFIX: &str = "logs-";

/// Pattern covering every daily partition. Searches always use it.
pub const ALL_PARTITIONS: &str = "logs-*";

/// Name of the daily index a document is written to, `logs-YYYY.MM.DD`.
///
/// Derived from the date the ingest request is processed, never from the
/// record's own timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexName(String);

impl IndexName {
    pub fn for_date(date: NaiveDate) -> Self {
        Self(format!("{INDEX_PREFIX}{}", date.format("%Y.%m.%d")))
    }

    /// Partition for the UTC calendar day containing `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::for_date(now.date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IndexName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_date_with_dots_and_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(IndexName::for_date(date).as_str(), "logs-2024.03.07");
    }

    #[test]
    fn same_day_maps_to_same_partition() {
        let morning = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(IndexName::at(morning), IndexName::at(night));
        assert_eq!(IndexName::at(night).to_string(), "logs-2024.12.31");
    }

    #[test]
    fn midnight_rolls_over_to_next_partition() {
        let next = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(IndexName::at(next).as_str(), "logs-2025.01.01");
    }

    #[test]
    fn every_partition_matches_search_pattern_prefix() {
        let name = IndexName::for_date(NaiveDate::from_ymd_opt(1999, 1, 2).unwrap());
        let prefix = ALL_PARTITIONS.trim_end_matches('*');
        assert!(name.as_str().starts_with(prefix));
        assert_eq!(prefix, INDEX_PREFIX);
    }
}
