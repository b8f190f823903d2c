//! Storage layer for recent searches.
//!
//! SQLite-backed persistence for the bounded recent-search history.
//! Connection setup and migrations live here; record semantics live in
//! [`recent_searches`].

pub mod recent_searches;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

use std::str::FromStr;

pub use recent_searches::{RECENT_SEARCH_CAPACITY, RecentSearch, RecentSearchStore, SearchRecord};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::config::StorageConfig;

/// Errors that occur while talking to the recent-search database.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database could not be opened
    #[error("Failed to connect to database '{url}': {source}")]
    Connection {
        /// Connection URL that was used
        url: String,
        /// Underlying driver error
        source: sqlx::Error,
    },

    /// Schema migration failed at startup
    #[error("Failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Query or transaction failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Opens the pool described by `config` and brings the schema up to date.
///
/// In-memory databases are pinned to a single long-lived connection, since
/// every SQLite connection to `:memory:` sees its own private database.
///
/// # Errors
///
/// - `StorageError::Connection` - If the URL is invalid or the database cannot be opened
/// - `StorageError::Migration` - If the schema migration fails
pub async fn connect_pool(config: &StorageConfig) -> Result<SqlitePool, StorageError> {
    let url = &config.database_url;
    let connection_error = |source| StorageError::Connection {
        url: url.clone(),
        source,
    };

    let options = SqliteConnectOptions::from_str(url)
        .map_err(connection_error)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout);

    let in_memory = url.contains(":memory:");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(connection_error)?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::debug!(url = %url, in_memory, "Recent-search database ready");
    Ok(pool)
}
