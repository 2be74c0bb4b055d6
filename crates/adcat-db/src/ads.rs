//! Read queries over the `ads` table.
//!
//! Listing goes through a small predicate builder: each present filter field
//! becomes one [`AdPredicate`], which appends a fixed SQL fragment and binds
//! its value. Filter values never reach the query text.

use adcat_core::{Ad, AdFilters, AdStatus, AssetType};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::DbError;

/// The scraper creates the timestamp columns as nullable `TIMESTAMP`; the
/// casts let the same mapping read both that table and the migrated one.
const AD_COLUMNS: &str = "id, ad_id, status, platforms, start_date, end_date, asset_url, \
                          asset_type, asset_path, multiple_versions, \
                          scraped_at::timestamptz AS scraped_at, \
                          created_at::timestamptz AS created_at, \
                          updated_at::timestamptz AS updated_at";

/// Newest start date first, undated ads last. `id` makes the order total.
const LIST_ORDER: &str =
    " ORDER BY start_date DESC NULLS LAST, scraped_at DESC NULLS LAST, id DESC";

/// A row from the `ads` table.
///
/// Several columns are nullable in the scraper-owned schema; they are
/// normalized when converting into [`Ad`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdRow {
    pub id: i32,
    pub ad_id: String,
    pub status: String,
    pub platforms: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub asset_url: Option<String>,
    pub asset_type: Option<String>,
    pub asset_path: Option<String>,
    pub multiple_versions: Option<bool>,
    pub scraped_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<AdRow> for Ad {
    fn from(row: AdRow) -> Self {
        Self {
            id: i64::from(row.id),
            ad_id: row.ad_id,
            status: AdStatus::from_stored(&row.status),
            platforms: row.platforms.unwrap_or_default(),
            start_date: row.start_date,
            end_date: row.end_date,
            asset_url: row.asset_url,
            asset_type: row.asset_type.as_deref().and_then(AssetType::from_stored),
            asset_path: row.asset_path,
            multiple_versions: row.multiple_versions.unwrap_or(false),
            scraped_at: row.scraped_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One conjunctive clause of the listing query together with its bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdPredicate<'a> {
    Status(AdStatus),
    Platform(&'a str),
    StartDateFrom(NaiveDate),
    /// Upper bound on the ad's *start* date (the `endDate` filter).
    StartDateUntil(NaiveDate),
    MultipleVersions(bool),
}

impl<'a> AdPredicate<'a> {
    fn push_onto(self, qb: &mut QueryBuilder<'a, Postgres>) {
        qb.push(" AND ");
        match self {
            AdPredicate::Status(status) => {
                qb.push("status = ").push_bind(status.as_str());
            }
            AdPredicate::Platform(platform) => {
                qb.push_bind(platform).push(" = ANY(platforms)");
            }
            AdPredicate::StartDateFrom(date) => {
                qb.push("start_date >= ").push_bind(date);
            }
            AdPredicate::StartDateUntil(date) => {
                qb.push("start_date <= ").push_bind(date);
            }
            AdPredicate::MultipleVersions(flag) => {
                // NULL is read back as `false`, so filter on the same view.
                qb.push("COALESCE(multiple_versions, FALSE) = ")
                    .push_bind(flag);
            }
        }
    }
}

/// Translates a filter set into predicates, in a fixed field order.
pub(crate) fn predicates(filters: &AdFilters) -> Vec<AdPredicate<'_>> {
    let mut out = Vec::with_capacity(5);
    if let Some(status) = filters.status {
        out.push(AdPredicate::Status(status));
    }
    if let Some(platform) = filters.platform.as_deref() {
        out.push(AdPredicate::Platform(platform));
    }
    if let Some(date) = filters.start_date {
        out.push(AdPredicate::StartDateFrom(date));
    }
    if let Some(date) = filters.end_date {
        out.push(AdPredicate::StartDateUntil(date));
    }
    if let Some(flag) = filters.multiple_versions {
        out.push(AdPredicate::MultipleVersions(flag));
    }
    out
}

pub(crate) fn build_list_query(filters: &AdFilters) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {AD_COLUMNS} FROM ads WHERE 1=1"));
    for predicate in predicates(filters) {
        predicate.push_onto(&mut qb);
    }
    qb.push(LIST_ORDER);
    qb
}

/// Returns every ad matching `filters`, newest start date first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_ads(pool: &PgPool, filters: &AdFilters) -> Result<Vec<Ad>, DbError> {
    let rows = build_list_query(filters)
        .build_query_as::<AdRow>()
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Ad::from).collect())
}

/// Looks up a single ad by its ad library identifier.
///
/// Returns `None` if no ad has that identifier.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_ad_by_ad_id(pool: &PgPool, ad_id: &str) -> Result<Option<Ad>, DbError> {
    let row = sqlx::query_as::<_, AdRow>(&format!("SELECT {AD_COLUMNS} FROM ads WHERE ad_id = $1"))
        .bind(ad_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Ad::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn list_sql(filters: &AdFilters) -> String {
        build_list_query(filters).sql().to_string()
    }

    #[test]
    fn unfiltered_query_has_no_predicates() {
        let sql = list_sql(&AdFilters::default());
        assert!(sql.ends_with(
            "FROM ads WHERE 1=1 ORDER BY start_date DESC NULLS LAST, \
             scraped_at DESC NULLS LAST, id DESC"
        ));
        assert!(!sql.contains('$'));
    }

    #[test]
    fn all_filters_bind_positionally_in_field_order() {
        let filters = AdFilters {
            status: Some(AdStatus::Active),
            platform: Some("instagram".to_string()),
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 12, 31)),
            multiple_versions: Some(true),
        };
        let sql = list_sql(&filters);
        assert!(sql.contains(
            "WHERE 1=1 AND status = $1 AND $2 = ANY(platforms) AND start_date >= $3 \
             AND start_date <= $4 AND COALESCE(multiple_versions, FALSE) = $5 ORDER BY"
        ));
    }

    #[test]
    fn filter_values_never_appear_in_query_text() {
        let filters = AdFilters {
            platform: Some("fb'); DROP TABLE ads; --".to_string()),
            ..AdFilters::default()
        };
        let sql = list_sql(&filters);
        assert!(!sql.contains("DROP TABLE"));
        assert!(sql.contains("$1 = ANY(platforms)"));
    }

    #[test]
    fn end_date_filter_bounds_start_date_column() {
        let filters = AdFilters {
            end_date: Some(date(2024, 6, 1)),
            ..AdFilters::default()
        };
        let sql = list_sql(&filters);
        assert!(sql.contains("AND start_date <= $1"));
        assert!(!sql.contains("end_date <="));
    }

    #[test]
    fn predicates_skip_absent_fields() {
        let filters = AdFilters {
            status: Some(AdStatus::Inactive),
            multiple_versions: Some(false),
            ..AdFilters::default()
        };
        assert_eq!(
            predicates(&filters),
            vec![
                AdPredicate::Status(AdStatus::Inactive),
                AdPredicate::MultipleVersions(false),
            ]
        );
    }
}
