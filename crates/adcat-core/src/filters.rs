use chrono::NaiveDate;

use crate::ads::{Ad, AdStatus};

/// Optional, additive constraints for listing ads.
///
/// Every present field narrows the result conjunctively; an empty filter set
/// matches the whole catalog.
///
/// Both `start_date` and `end_date` bound the ad's *start* date. `end_date`
/// does not look at the ad's end date at all: dashboard callers rely on this
/// "started on or before" meaning, so it is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdFilters {
    pub status: Option<AdStatus>,
    pub platform: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub multiple_versions: Option<bool>,
}

impl AdFilters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.platform.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.multiple_versions.is_none()
    }

    /// Evaluates the filter set against a single ad in memory.
    ///
    /// Mirrors the SQL predicates, including SQL's null handling: an ad with
    /// no start date never satisfies a date bound.
    #[must_use]
    pub fn matches(&self, ad: &Ad) -> bool {
        if self.status.is_some_and(|status| ad.status != status) {
            return false;
        }
        if let Some(platform) = self.platform.as_deref() {
            if !ad.has_platform(platform) {
                return false;
            }
        }
        if let Some(from) = self.start_date {
            if !ad.start_date.is_some_and(|d| d >= from) {
                return false;
            }
        }
        if let Some(until) = self.end_date {
            if !ad.start_date.is_some_and(|d| d <= until) {
                return false;
            }
        }
        if self
            .multiple_versions
            .is_some_and(|flag| ad.multiple_versions != flag)
        {
            return false;
        }
        true
    }
}
