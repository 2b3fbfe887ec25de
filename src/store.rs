//! Gateway to the transport record store.
//!
//! Wraps the SQLite pool behind the two operations the rest of the system
//! needs: a recency-filtered scan and an append-only put. The store is the
//! only shared resource between concurrent requests and the refresh loop;
//! consistency is whatever SQLite commits, filtered by the recency window.

use sqlx::SqlitePool;

use crate::models::TransportRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All records with an ingestion timestamp strictly newer than
    /// `newer_than` (Unix seconds).
    pub async fn scan_recent(&self, newer_than: i64) -> Result<Vec<TransportRecord>, StoreError> {
        let records = sqlx::query_as::<_, TransportRecord>(
            "SELECT id, transport_type, route, destination, current_location, \
                    scheduled_arrival_mins, timestamp, last_updated \
             FROM transport_records WHERE timestamp > ?",
        )
        .bind(newer_than)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Append a single record. Puts are independent: callers issue one per
    /// record with no transaction spanning a batch.
    pub async fn put(&self, record: &TransportRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO transport_records \
                 (id, transport_type, route, destination, current_location, \
                  scheduled_arrival_mins, timestamp, last_updated) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.transport_type)
        .bind(&record.route)
        .bind(&record.destination)
        .bind(&record.current_location)
        .bind(record.scheduled_arrival_mins)
        .bind(record.timestamp)
        .bind(&record.last_updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
