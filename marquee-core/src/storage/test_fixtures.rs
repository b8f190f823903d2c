//! Test fixtures for recent-search storage.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use tempfile::TempDir;

use super::RecentSearchStore;
use crate::config::StorageConfig;
use crate::input::SearchTitle;

/// Storage config for a database file inside `dir`.
pub fn storage_config_in(dir: &Path) -> StorageConfig {
    StorageConfig {
        database_url: format!("sqlite://{}", dir.join("recent.db").display()),
        ..Default::default()
    }
}

/// Opens an empty store backed by a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the store is used.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
pub async fn open_temp_store() -> (RecentSearchStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = RecentSearchStore::open(&storage_config_in(dir.path()))
        .await
        .unwrap();
    (store, dir)
}

/// Parses a title known to be valid.
///
/// # Panics
///
/// Panics if `raw` is blank.
pub fn title(raw: &str) -> SearchTitle {
    SearchTitle::parse(raw).unwrap()
}
