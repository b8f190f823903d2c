//! Movie metadata fetching using the OMDb API.

use async_trait::async_trait;
use marquee_core::config::OmdbConfig;
use marquee_core::{ExternalId, SearchTitle};

use crate::errors::{GatewayError, MetadataUnavailable};
use crate::providers::MovieMetadataProvider;
use crate::types::{
    MovieDetailResponse, SearchResponse, decode_movie_detail, decode_search_response,
};

/// OMDb client for title searches and movie details.
///
/// Holds no mutable state; one instance can serve any number of concurrent
/// lookups. Every lookup is a single GET with no retry, bounded by the
/// configured request timeout.
#[derive(Debug, Clone)]
pub struct OmdbGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OmdbGateway {
    /// Creates a gateway from provider configuration.
    ///
    /// A missing or blank API key is accepted here; lookups then report
    /// the provider as unavailable without touching the network.
    ///
    /// # Errors
    ///
    /// - `GatewayError::ClientBuild` - If the HTTP client cannot be initialized
    pub fn new(config: &OmdbConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(GatewayError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.usable_api_key().map(str::to_string),
        })
    }

    /// Search URL for `title`: first page, movies only.
    fn search_url(&self, api_key: &str, title: &SearchTitle) -> String {
        format!(
            "{}?apikey={}&s={}&page=1&type=movie",
            self.base_url,
            urlencoding::encode(api_key),
            urlencoding::encode(title.as_str())
        )
    }

    /// Details URL for `imdb_id` with the full-length plot.
    fn details_url(&self, api_key: &str, imdb_id: &ExternalId) -> String {
        format!(
            "{}?apikey={}&i={}&plot=full",
            self.base_url,
            urlencoding::encode(api_key),
            urlencoding::encode(imdb_id.as_str())
        )
    }

    async fn try_search(&self, title: &SearchTitle) -> Result<SearchResponse, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::MissingApiKey)?;

        tracing::info!(title = %title, "Searching for movies");
        let body = self.fetch(&self.search_url(api_key, title)).await?;
        Ok(decode_search_response(&body)?)
    }

    async fn try_details(&self, imdb_id: &ExternalId) -> Result<MovieDetailResponse, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::MissingApiKey)?;

        tracing::info!(imdb_id = %imdb_id, "Getting movie details");
        let body = self.fetch(&self.details_url(api_key, imdb_id)).await?;
        Ok(decode_movie_detail(&body)?)
    }

    /// Issues one GET and returns the body of a successful response.
    async fn fetch(&self, url: &str) -> Result<String, GatewayError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus { status });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl MovieMetadataProvider for OmdbGateway {
    async fn search_by_title(
        &self,
        title: &SearchTitle,
    ) -> Result<SearchResponse, MetadataUnavailable> {
        self.try_search(title).await.map_err(|e| {
            tracing::error!(operation = "search", title = %title, error = %e, "Movie search failed");
            MetadataUnavailable
        })
    }

    async fn details_by_id(
        &self,
        imdb_id: &ExternalId,
    ) -> Result<MovieDetailResponse, MetadataUnavailable> {
        self.try_details(imdb_id).await.map_err(|e| {
            tracing::error!(operation = "details", imdb_id = %imdb_id, error = %e, "Movie details lookup failed");
            MetadataUnavailable
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config_with_key(api_key: Option<&str>) -> OmdbConfig {
        OmdbConfig {
            api_key: api_key.map(str::to_string),
            // Nothing listens here; a request would fail rather than hang.
            base_url: "http://127.0.0.1:9/".to_string(),
            request_timeout: Duration::from_millis(500),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_url_encodes_title_and_pins_page_and_type() {
        let gateway = OmdbGateway::new(&config_with_key(Some("k3y"))).unwrap();
        let title = SearchTitle::parse("Fast & Furious: Tokyo Drift").unwrap();

        assert_eq!(
            gateway.search_url("k3y", &title),
            "http://127.0.0.1:9/?apikey=k3y&s=Fast%20%26%20Furious%3A%20Tokyo%20Drift&page=1&type=movie"
        );
    }

    #[test]
    fn test_details_url_requests_full_plot() {
        let gateway = OmdbGateway::new(&config_with_key(Some("k3y"))).unwrap();
        let imdb_id = ExternalId::parse("tt0133093").unwrap();

        assert_eq!(
            gateway.details_url("k3y", &imdb_id),
            "http://127.0.0.1:9/?apikey=k3y&i=tt0133093&plot=full"
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_reported_before_any_request() {
        let gateway = OmdbGateway::new(&config_with_key(Some("  "))).unwrap();
        let title = SearchTitle::parse("Inception").unwrap();

        assert!(matches!(
            gateway.try_search(&title).await,
            Err(GatewayError::MissingApiKey)
        ));
        assert_eq!(
            gateway.search_by_title(&title).await,
            Err(MetadataUnavailable)
        );
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_unavailable() {
        let gateway = OmdbGateway::new(&config_with_key(Some("k3y"))).unwrap();
        let imdb_id = ExternalId::parse("tt0133093").unwrap();

        assert!(matches!(
            gateway.try_details(&imdb_id).await,
            Err(GatewayError::Transport(_))
        ));
        assert_eq!(
            gateway.details_by_id(&imdb_id).await,
            Err(MetadataUnavailable)
        );
    }
}
