use adcat_core::{Ad, AdFilters, AdStats};
use sqlx::PgPool;

use crate::{ads, connect_pool, health_check, stats, DbError, PoolConfig};

/// Shared handle to the ad store.
///
/// Built once at process start and handed to every consumer; cloning is
/// cheap and shares the same bounded pool. Call [`AdStore::close`] during
/// shutdown to drain connections.
#[derive(Debug, Clone)]
pub struct AdStore {
    pool: PgPool,
}

impl AdStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the connection cannot be established.
    pub async fn connect(database_url: &str, config: PoolConfig) -> Result<Self, DbError> {
        let pool = connect_pool(database_url, config).await?;
        Ok(Self::new(pool))
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn list_ads(&self, filters: &AdFilters) -> Result<Vec<Ad>, DbError> {
        ads::list_ads(&self.pool, filters).await
    }

    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn find_ad(&self, ad_id: &str) -> Result<Option<Ad>, DbError> {
        ads::find_ad_by_ad_id(&self.pool, ad_id).await
    }

    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if any aggregate query fails.
    pub async fn compute_stats(&self) -> Result<AdStats, DbError> {
        stats::compute_stats(&self.pool).await
    }

    /// # Errors
    ///
    /// Returns [`DbError`] if the store cannot be reached.
    pub async fn health_check(&self) -> Result<(), DbError> {
        health_check(&self.pool).await
    }

    /// Closes the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("ad store connection pool closed");
    }
}
