//! Mock provider implementation for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use marquee_core::{ExternalId, SearchTitle};
use parking_lot::Mutex;

use super::MovieMetadataProvider;
use crate::errors::MetadataUnavailable;
use crate::types::{MovieDetailResponse, MovieSummary, ResponseStatus, SearchResponse};

/// Mock provider with scripted replies and call counters.
#[derive(Debug)]
pub struct MockMetadataProvider {
    search_reply: Mutex<Result<SearchResponse, MetadataUnavailable>>,
    details_reply: Mutex<Result<MovieDetailResponse, MetadataUnavailable>>,
    search_calls: AtomicUsize,
    details_calls: AtomicUsize,
}

impl MockMetadataProvider {
    /// Creates a provider that reports itself unavailable until scripted.
    pub fn new() -> Self {
        Self {
            search_reply: Mutex::new(Err(MetadataUnavailable)),
            details_reply: Mutex::new(Err(MetadataUnavailable)),
            search_calls: AtomicUsize::new(0),
            details_calls: AtomicUsize::new(0),
        }
    }

    /// Scripts the reply to every search.
    pub fn with_search_reply(self, reply: Result<SearchResponse, MetadataUnavailable>) -> Self {
        *self.search_reply.lock() = reply;
        self
    }

    /// Scripts the reply to every details lookup.
    pub fn with_details_reply(
        self,
        reply: Result<MovieDetailResponse, MetadataUnavailable>,
    ) -> Self {
        *self.details_reply.lock() = reply;
        self
    }

    /// Number of searches received.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of details lookups received.
    pub fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockMetadataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieMetadataProvider for MockMetadataProvider {
    async fn search_by_title(
        &self,
        _title: &SearchTitle,
    ) -> Result<SearchResponse, MetadataUnavailable> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.search_reply.lock().clone()
    }

    async fn details_by_id(
        &self,
        _imdb_id: &ExternalId,
    ) -> Result<MovieDetailResponse, MetadataUnavailable> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        self.details_reply.lock().clone()
    }
}

/// Successful one-result search page.
pub fn found_search(title: &str, imdb_id: &str) -> SearchResponse {
    SearchResponse {
        search: vec![MovieSummary {
            title: title.to_string(),
            year: "2010".to_string(),
            imdb_id: imdb_id.to_string(),
            kind: "movie".to_string(),
            poster: None,
        }],
        total_results: Some("1".to_string()),
        response: ResponseStatus::True,
        error: None,
    }
}

/// Search page the provider sends when nothing matched.
pub fn not_found_search(error: Option<&str>) -> SearchResponse {
    SearchResponse {
        search: Vec::new(),
        total_results: None,
        response: ResponseStatus::False,
        error: error.map(str::to_string),
    }
}
