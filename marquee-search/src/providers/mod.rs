//! Provider seam for movie metadata lookups.

use async_trait::async_trait;
use marquee_core::{ExternalId, SearchTitle};

use crate::errors::MetadataUnavailable;
use crate::types::{MovieDetailResponse, SearchResponse};

#[cfg(test)]
pub mod mock;

#[cfg(test)]
pub use mock::MockMetadataProvider;

/// Source of movie metadata.
///
/// Implementations decode the provider's answer but do not interpret it:
/// a "not found" reply is a successful lookup whose `response` is `False`.
/// Every failure to produce a decoded answer is [`MetadataUnavailable`].
#[async_trait]
pub trait MovieMetadataProvider: Send + Sync + std::fmt::Debug {
    /// Searches movies whose title matches `title`.
    ///
    /// # Errors
    /// - `MetadataUnavailable` - Missing credentials, transport failure, non-success status or malformed body
    async fn search_by_title(
        &self,
        title: &SearchTitle,
    ) -> Result<SearchResponse, MetadataUnavailable>;

    /// Fetches the full record of one movie.
    ///
    /// # Errors
    /// - `MetadataUnavailable` - Missing credentials, transport failure, non-success status or malformed body
    async fn details_by_id(
        &self,
        imdb_id: &ExternalId,
    ) -> Result<MovieDetailResponse, MetadataUnavailable>;
}
