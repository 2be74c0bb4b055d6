use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of distinct start dates reported in [`AdStats::by_date`].
pub const STATS_DATE_LIMIT: i64 = 30;

/// Number of ads that started on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Catalog-wide summary, always computed over the unfiltered population.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub with_multiple_versions: i64,
    /// One bucket per platform name; an ad listed on N platforms counts N times.
    pub by_platform: BTreeMap<String, i64>,
    /// Newest first, non-null start dates only, at most [`STATS_DATE_LIMIT`] entries.
    pub by_date: Vec<DateCount>,
}

impl AdStats {
    /// Ads whose status is neither `active` nor `inactive`.
    #[must_use]
    pub fn unknown(&self) -> i64 {
        (self.total - self.active - self.inactive).max(0)
    }

    /// Sum of all platform buckets.
    #[must_use]
    pub fn platform_mentions(&self) -> i64 {
        self.by_platform.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_are_all_zero() {
        let stats = AdStats::default();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.unknown(), 0);
        assert_eq!(stats.platform_mentions(), 0);
        assert!(stats.by_date.is_empty());
    }

    #[test]
    fn unknown_is_the_remainder() {
        let stats = AdStats {
            total: 10,
            active: 6,
            inactive: 3,
            ..AdStats::default()
        };
        assert_eq!(stats.unknown(), 1);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut by_platform = BTreeMap::new();
        by_platform.insert("facebook".to_string(), 2);
        by_platform.insert("instagram".to_string(), 1);
        let stats = AdStats {
            total: 2,
            active: 1,
            inactive: 1,
            with_multiple_versions: 0,
            by_platform,
            by_date: vec![DateCount {
                date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"),
                count: 1,
            }],
        };

        let json = serde_json::to_value(&stats).expect("serialize");
        assert_eq!(json["withMultipleVersions"], 0);
        assert_eq!(json["byPlatform"]["facebook"], 2);
        assert_eq!(json["byDate"][0]["date"], "2024-02-01");
        assert_eq!(json["byDate"][0]["count"], 1);
    }
}
