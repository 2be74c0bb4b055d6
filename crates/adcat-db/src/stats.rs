//! Catalog-wide aggregates for the dashboard summary.

use std::collections::BTreeMap;

use adcat_core::{AdStats, AdStatus, DateCount, STATS_DATE_LIMIT};
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use crate::DbError;

#[derive(Debug, sqlx::FromRow)]
struct StatusCountsRow {
    total: i64,
    active: i64,
    inactive: i64,
    with_multiple_versions: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct PlatformCountRow {
    platform: String,
    count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct DateCountRow {
    date: NaiveDate,
    count: i64,
}

/// Computes the summary over the full, unfiltered ad population.
///
/// The aggregates run inside one read-only `REPEATABLE READ` transaction so
/// they all observe the same snapshot. Any failing aggregate fails the whole
/// call; no partial summary is returned.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any query fails.
pub async fn compute_stats(pool: &PgPool) -> Result<AdStats, DbError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;

    let counts = status_counts(&mut *tx).await?;
    let by_platform = platform_counts(&mut *tx).await?;
    let by_date = start_date_counts(&mut *tx).await?;

    tx.commit().await?;

    Ok(AdStats {
        total: counts.total,
        active: counts.active,
        inactive: counts.inactive,
        with_multiple_versions: counts.with_multiple_versions,
        by_platform,
        by_date,
    })
}

async fn status_counts(conn: &mut PgConnection) -> Result<StatusCountsRow, DbError> {
    let row = sqlx::query_as::<_, StatusCountsRow>(
        "SELECT \
             COUNT(*) AS total, \
             COUNT(*) FILTER (WHERE status = $1) AS active, \
             COUNT(*) FILTER (WHERE status = $2) AS inactive, \
             COUNT(*) FILTER (WHERE multiple_versions) AS with_multiple_versions \
         FROM ads",
    )
    .bind(AdStatus::Active.as_str())
    .bind(AdStatus::Inactive.as_str())
    .fetch_one(conn)
    .await?;

    Ok(row)
}

async fn platform_counts(conn: &mut PgConnection) -> Result<BTreeMap<String, i64>, DbError> {
    let rows = sqlx::query_as::<_, PlatformCountRow>(
        "SELECT platform, COUNT(*) AS count \
         FROM (SELECT unnest(platforms) AS platform FROM ads) AS flattened \
         WHERE platform IS NOT NULL \
         GROUP BY platform \
         ORDER BY count DESC, platform",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows.into_iter().map(|r| (r.platform, r.count)).collect())
}

async fn start_date_counts(conn: &mut PgConnection) -> Result<Vec<DateCount>, DbError> {
    let rows = sqlx::query_as::<_, DateCountRow>(
        "SELECT start_date AS date, COUNT(*) AS count \
         FROM ads \
         WHERE start_date IS NOT NULL \
         GROUP BY start_date \
         ORDER BY start_date DESC \
         LIMIT $1",
    )
    .bind(STATS_DATE_LIMIT)
    .fetch_all(conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| DateCount {
            date: r.date,
            count: r.count,
        })
        .collect())
}
