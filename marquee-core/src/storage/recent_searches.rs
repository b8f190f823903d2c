//! Bounded, recency-ordered history of search titles.
//!
//! At most [`RECENT_SEARCH_CAPACITY`] records exist, one per case-insensitive
//! title. Re-searching a title touches its record instead of adding a new
//! one; a new title evicts the least recently touched records once the
//! store is full.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use super::{StorageError, connect_pool};
use crate::config::StorageConfig;
use crate::input::{SearchTitle, normalize_title};

/// Maximum number of recent searches kept.
pub const RECENT_SEARCH_CAPACITY: usize = 5;

const SELECT_RECORD: &str = r#"
    SELECT id, title, normalized_title, last_touched_at
    FROM recent_searches
"#;

/// One remembered search title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    /// Assigned on creation, stable for the record's lifetime
    pub id: i64,
    /// Title exactly as first submitted
    pub title: String,
    /// Case-insensitive fold of `title`
    pub normalized_key: String,
    /// Creation time or time of the latest re-search
    pub last_touched_at: DateTime<Utc>,
}

/// Recent search as handed to callers of the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearch {
    pub title: String,
    pub last_touched_at: DateTime<Utc>,
}

impl From<SearchRecord> for RecentSearch {
    fn from(record: SearchRecord) -> Self {
        Self {
            title: record.title,
            last_touched_at: record.last_touched_at,
        }
    }
}

/// Persistent store of recent search titles.
///
/// Cloning is cheap and clones share the same database and writer lock.
#[derive(Debug, Clone)]
pub struct RecentSearchStore {
    pool: SqlitePool,
    // Serializes touch-or-insert-and-evict across the whole record set.
    writer: Arc<Mutex<()>>,
}

impl RecentSearchStore {
    /// Opens (and migrates) the database described by `config`.
    ///
    /// # Errors
    ///
    /// - `StorageError::Connection` - If the database cannot be opened
    /// - `StorageError::Migration` - If the schema migration fails
    pub async fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        let pool = connect_pool(config).await?;
        Ok(Self::from_pool(pool))
    }

    /// Wraps an already migrated pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Maximum number of records this store keeps.
    pub fn capacity(&self) -> usize {
        RECENT_SEARCH_CAPACITY
    }

    /// Records a search for `title`, touching the existing record for the
    /// same case-insensitive title or inserting a new one.
    ///
    /// Inserting into a full store first evicts every record past the
    /// newest `capacity - 1`. The whole sequence commits atomically.
    ///
    /// # Errors
    ///
    /// - `StorageError::Database` - If any query or the commit fails; nothing is applied
    pub async fn record_search(&self, title: &SearchTitle) -> Result<SearchRecord, StorageError> {
        let normalized_key = title.normalized_key();

        let _writer = self.writer.lock().await;
        // Take the write lock up front so other connections wait out the
        // busy timeout instead of failing on a read-to-write upgrade.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let newest: Option<i64> =
            sqlx::query_scalar("SELECT MAX(last_touched_at) FROM recent_searches")
                .fetch_one(&mut *tx)
                .await?;
        let touched_at = next_touch_micros(newest);

        let query = format!("{SELECT_RECORD} WHERE normalized_title = $1");
        let existing = sqlx::query_as::<_, SearchRecordRow>(&query)
            .bind(&normalized_key)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(row) = existing {
            sqlx::query("UPDATE recent_searches SET last_touched_at = $1 WHERE id = $2")
                .bind(touched_at)
                .bind(row.id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            tracing::debug!(id = row.id, title = %row.title, "Touched recent search");
            return Ok(SearchRecord::from(SearchRecordRow {
                last_touched_at: touched_at,
                ..row
            }));
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recent_searches")
            .fetch_one(&mut *tx)
            .await?;

        if total >= RECENT_SEARCH_CAPACITY as i64 {
            // Ranked over the full set so rows beyond the limit never linger.
            let evicted: Vec<String> = sqlx::query_scalar(
                r#"
                DELETE FROM recent_searches
                WHERE id NOT IN (
                    SELECT id FROM recent_searches
                    ORDER BY last_touched_at DESC, id DESC
                    LIMIT $1
                )
                RETURNING title
                "#,
            )
            .bind(RECENT_SEARCH_CAPACITY as i64 - 1)
            .fetch_all(&mut *tx)
            .await?;

            tracing::debug!(evicted = ?evicted, "Evicted least recently touched searches");
        }

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO recent_searches (title, normalized_title, last_touched_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(title.as_str())
        .bind(&normalized_key)
        .bind(touched_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(id, title = %title, "Recorded new recent search");
        Ok(SearchRecord::from(SearchRecordRow {
            id,
            title: title.as_str().to_string(),
            normalized_title: normalized_key,
            last_touched_at: touched_at,
        }))
    }

    /// Returns up to `capacity` records, most recently touched first.
    ///
    /// Storage failures are logged and yield an empty list, so an empty
    /// result does not prove that no searches happened.
    pub async fn latest(&self) -> Vec<SearchRecord> {
        match self.try_latest().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load latest searches");
                Vec::new()
            }
        }
    }

    async fn try_latest(&self) -> Result<Vec<SearchRecord>, StorageError> {
        let query = format!("{SELECT_RECORD} ORDER BY last_touched_at DESC, id DESC LIMIT $1");
        let rows = sqlx::query_as::<_, SearchRecordRow>(&query)
            .bind(RECENT_SEARCH_CAPACITY as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Case-insensitive membership test against the current records.
    ///
    /// Storage failures are logged and reported as `false`.
    pub async fn exists(&self, title: &str) -> bool {
        let normalized_key = normalize_title(title);
        if normalized_key.is_empty() {
            return false;
        }

        let result: Result<i64, sqlx::Error> =
            sqlx::query_scalar("SELECT COUNT(*) FROM recent_searches WHERE normalized_title = $1")
                .bind(&normalized_key)
                .fetch_one(&self.pool)
                .await;

        match result {
            Ok(count) => count > 0,
            Err(e) => {
                tracing::error!(error = %e, title, "Failed to check recent search");
                false
            }
        }
    }

    /// Total number of stored records.
    ///
    /// # Errors
    ///
    /// - `StorageError::Database` - If the query fails
    pub async fn count(&self) -> Result<usize, StorageError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recent_searches")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(total).unwrap_or_default())
    }

    /// Removes every record.
    ///
    /// # Errors
    ///
    /// - `StorageError::Database` - If the delete fails
    pub async fn clear(&self) -> Result<(), StorageError> {
        let _writer = self.writer.lock().await;
        let removed = sqlx::query("DELETE FROM recent_searches")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(removed, "Cleared recent searches");
        Ok(())
    }

    /// Closes the underlying pool. Later operations fail with a storage error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Picks a touch time later than every stored one, even under clock skew
/// or sub-microsecond bursts.
fn next_touch_micros(newest: Option<i64>) -> i64 {
    let now = Utc::now().timestamp_micros();
    match newest {
        Some(newest) if newest >= now => newest + 1,
        _ => now,
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SearchRecordRow {
    id: i64,
    title: String,
    normalized_title: String,
    last_touched_at: i64,
}

impl From<SearchRecordRow> for SearchRecord {
    fn from(row: SearchRecordRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            normalized_key: row.normalized_title,
            last_touched_at: DateTime::from_timestamp_micros(row.last_touched_at)
                .unwrap_or_default(),
        }
    }
}
