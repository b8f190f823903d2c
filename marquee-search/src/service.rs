//! Search orchestration.
//!
//! Combines the recent-search store with a metadata provider: a search is
//! recorded in the history and then sent upstream, and the provider's
//! answer is translated into a [`LookupOutcome`].

use std::sync::Arc;

use marquee_core::{ExternalId, HistoryPolicy, RecentSearch, RecentSearchStore, SearchTitle};

use crate::outcome::LookupOutcome;
use crate::providers::MovieMetadataProvider;
use crate::types::{MovieDetail, ResponseStatus, SearchResponse};

const DEFAULT_SEARCH_NOT_FOUND: &str = "No movies found";
const DEFAULT_DETAILS_NOT_FOUND: &str = "Movie not found";

/// Entry point for movie searches, detail lookups and search history.
#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    store: RecentSearchStore,
    provider: Arc<dyn MovieMetadataProvider>,
    history_policy: HistoryPolicy,
}

impl SearchOrchestrator {
    /// Creates an orchestrator over `store` and `provider`.
    pub fn new(
        store: RecentSearchStore,
        provider: Arc<dyn MovieMetadataProvider>,
        history_policy: HistoryPolicy,
    ) -> Self {
        Self {
            store,
            provider,
            history_policy,
        }
    }

    /// Recent-search store backing the history.
    pub fn store(&self) -> &RecentSearchStore {
        &self.store
    }

    /// Records `raw_title` in the history and searches the provider for it.
    ///
    /// With [`HistoryPolicy::Required`] a failed history write ends the
    /// request as `Unavailable` before the provider is called.
    pub async fn search(&self, raw_title: &str) -> LookupOutcome<SearchResponse> {
        let title = match SearchTitle::parse(raw_title) {
            Ok(title) => title,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected search request");
                return LookupOutcome::InvalidInput(e);
            }
        };

        if let Err(e) = self.store.record_search(&title).await {
            match self.history_policy {
                HistoryPolicy::Required => {
                    tracing::error!(title = %title, error = %e, "Failed to record search; aborting");
                    return LookupOutcome::Unavailable;
                }
                HistoryPolicy::BestEffort => {
                    tracing::warn!(title = %title, error = %e, "Failed to record search; continuing");
                }
            }
        }

        match self.provider.search_by_title(&title).await {
            Err(_) => LookupOutcome::Unavailable,
            Ok(response) => match response.response {
                ResponseStatus::True => LookupOutcome::Found(response),
                ResponseStatus::False => {
                    let message = response
                        .error
                        .unwrap_or_else(|| DEFAULT_SEARCH_NOT_FOUND.to_string());
                    tracing::debug!(title = %title, message = %message, "No movies matched");
                    LookupOutcome::NotFound(message)
                }
            },
        }
    }

    /// Looks up full details for `raw_id`. Does not touch the history.
    pub async fn details(&self, raw_id: &str) -> LookupOutcome<MovieDetail> {
        let imdb_id = match ExternalId::parse(raw_id) {
            Ok(imdb_id) => imdb_id,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected details request");
                return LookupOutcome::InvalidInput(e);
            }
        };

        match self.provider.details_by_id(&imdb_id).await {
            Err(_) => LookupOutcome::Unavailable,
            Ok(response) => match (response.response, response.movie) {
                (ResponseStatus::True, Some(movie)) => LookupOutcome::Found(movie),
                (ResponseStatus::True, None) => {
                    tracing::error!(imdb_id = %imdb_id, "Successful details response without a movie");
                    LookupOutcome::Unavailable
                }
                (ResponseStatus::False, _) => LookupOutcome::NotFound(
                    response
                        .error
                        .unwrap_or_else(|| DEFAULT_DETAILS_NOT_FOUND.to_string()),
                ),
            },
        }
    }

    /// Most recent searches, newest first. Empty if the history cannot be read.
    pub async fn recent_searches(&self) -> Vec<RecentSearch> {
        self.store
            .latest()
            .await
            .into_iter()
            .map(RecentSearch::from)
            .collect()
    }
}
