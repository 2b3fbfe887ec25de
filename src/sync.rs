//! Background refresh of the transport record set.
//!
//! An external deployment would wire a scheduler to `POST /api/update`; the
//! server also runs its own loop so the store never goes stale while it is
//! up. Both paths funnel through [`refresh_records`].

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::providers::sample;
use crate::store::{SqliteStore, StoreError};

/// Generate a fresh batch from the upstream feed and append every record to
/// the store. Puts are independent; the first failure aborts the batch and
/// the whole refresh reports the error.
pub async fn refresh_records(store: &SqliteStore) -> Result<usize, StoreError> {
    let batch = sample::generate_batch(&mut rand::thread_rng(), Utc::now());

    for record in &batch {
        store.put(record).await?;
    }

    Ok(batch.len())
}

/// Drives the periodic refresh loop.
pub struct RefreshManager {
    store: SqliteStore,
    interval_secs: u64,
}

impl RefreshManager {
    pub fn new(store: SqliteStore, interval_secs: u64) -> Self {
        Self {
            store,
            interval_secs,
        }
    }

    /// Run the refresh loop forever. The first tick fires immediately,
    /// seeding the store at startup; failures are logged and the loop
    /// keeps going.
    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting transport refresh loop");
        let mut interval =
            tokio::time::interval(tokio::time::Duration::from_secs(self.interval_secs));

        loop {
            interval.tick().await;
            match refresh_records(&self.store).await {
                Ok(count) => info!(count, "Refreshed transport records"),
                Err(e) => error!(error = %e, "Transport refresh failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;

    // Single connection: every pooled connection to sqlite::memory: would
    // otherwise get its own empty database.
    async fn test_pool() -> SqlitePool {
        sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn test_store() -> SqliteStore {
        let pool = test_pool().await;
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        SqliteStore::new(pool)
    }

    #[tokio::test]
    async fn refresh_appends_a_full_batch() {
        let store = test_store().await;

        let count = refresh_records(&store).await.unwrap();
        assert_eq!(count, sample::BATCH_SIZE);

        let records = store.scan_recent(0).await.unwrap();
        assert_eq!(records.len(), sample::BATCH_SIZE);
    }

    #[tokio::test]
    async fn repeated_refreshes_append_rather_than_replace() {
        let store = test_store().await;

        refresh_records(&store).await.unwrap();
        refresh_records(&store).await.unwrap();

        let records = store.scan_recent(0).await.unwrap();
        assert_eq!(records.len(), 2 * sample::BATCH_SIZE);
    }

    #[tokio::test]
    async fn refresh_reports_store_failure() {
        // No migrations: the table is missing and every put fails.
        let store = SqliteStore::new(test_pool().await);

        assert!(refresh_records(&store).await.is_err());
    }
}
