//! Durability and concurrency checks for the recent-search store.

use std::collections::HashSet;

use marquee_core::config::StorageConfig;
use marquee_core::storage::RECENT_SEARCH_CAPACITY;
use marquee_core::{RecentSearchStore, SearchRecord, SearchTitle, StorageError};
use tempfile::TempDir;
use tokio::task::JoinHandle;

fn config_in(dir: &TempDir) -> StorageConfig {
    StorageConfig {
        database_url: format!("sqlite://{}", dir.path().join("history.db").display()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let store = RecentSearchStore::open(&config).await.unwrap();
    for name in ["Alien", "Aliens", "Alien 3"] {
        store
            .record_search(&SearchTitle::parse(name).unwrap())
            .await
            .unwrap();
    }
    let before = store.latest().await;
    store.close().await;

    let reopened = RecentSearchStore::open(&config).await.unwrap();
    assert_eq!(reopened.latest().await, before);
    assert!(reopened.exists("ALIENS").await);

    // Timestamps keep moving forward after a restart.
    let touched = reopened
        .record_search(&SearchTitle::parse("alien").unwrap())
        .await
        .unwrap();
    assert!(touched.last_touched_at > before[0].last_touched_at);
    assert_eq!(reopened.latest().await[0].title, "Alien");
}

#[tokio::test]
async fn test_concurrent_new_titles_respect_capacity() {
    let dir = TempDir::new().unwrap();
    let store = RecentSearchStore::open(&config_in(&dir)).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let title = SearchTitle::parse(&format!("Concurrent {i}")).unwrap();
            store.record_search(&title).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.count().await.unwrap(), RECENT_SEARCH_CAPACITY);
    let latest = store.latest().await;
    let keys: HashSet<&str> = latest.iter().map(|r| r.normalized_key.as_str()).collect();
    assert_eq!(keys.len(), latest.len());
}

#[tokio::test]
async fn test_two_stores_on_one_file_wait_for_each_other() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let first = RecentSearchStore::open(&config).await.unwrap();
    let second = RecentSearchStore::open(&config).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..100 {
        let store = if i % 2 == 0 { first.clone() } else { second.clone() };
        handles.push(tokio::spawn(async move {
            let title = SearchTitle::parse(&format!("Shared {i}")).unwrap();
            store.record_search(&title).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(first.count().await.unwrap(), RECENT_SEARCH_CAPACITY);
    assert_eq!(second.latest().await, first.latest().await);
}

#[tokio::test]
async fn test_concurrent_same_title_creates_one_record() {
    let dir = TempDir::new().unwrap();
    let store = RecentSearchStore::open(&config_in(&dir)).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..10 {
        let store = store.clone();
        let raw = if i % 2 == 0 { "Heat" } else { "HEAT" };
        handles.push(tokio::spawn(async move {
            store.record_search(&SearchTitle::parse(raw).unwrap()).await
        }));
    }
    let ids: HashSet<i64> = collect_record_ids(handles).await;

    assert_eq!(ids.len(), 1);
    assert_eq!(store.count().await.unwrap(), 1);
}

async fn collect_record_ids(
    handles: Vec<JoinHandle<Result<SearchRecord, StorageError>>>,
) -> HashSet<i64> {
    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap().id);
    }
    ids
}

#[tokio::test]
async fn test_in_memory_database_keeps_state_across_calls() {
    let config = StorageConfig {
        database_url: "sqlite::memory:".to_string(),
        ..Default::default()
    };
    let store = RecentSearchStore::open(&config).await.unwrap();

    store
        .record_search(&SearchTitle::parse("Memento").unwrap())
        .await
        .unwrap();
    assert!(store.exists("memento").await);
    assert_eq!(store.latest().await.len(), 1);
}
