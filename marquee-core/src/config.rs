//! Centralized configuration for Marquee.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Marquee components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub omdb: OmdbConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
}

/// Upstream movie metadata provider configuration.
///
/// Controls the provider endpoint, the access key and HTTP transport limits.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    /// Access key sent as the `apikey` query parameter
    pub api_key: Option<String>,
    /// Base URL every query is appended to
    pub base_url: String,
    /// Upper bound for a single upstream request, connect included
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "http://www.omdbapi.com/".to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: "marquee/0.1.0",
        }
    }
}

impl OmdbConfig {
    /// Returns the configured key if it is present and not blank.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Recent-search persistence configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// SQLite connection URL for the recent-search database
    pub database_url: String,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// How long a writer waits on a locked database before failing
    pub busy_timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://marquee.db?mode=rwc".to_string(),
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// How a failed history write affects the search it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    /// Recording the search is a prerequisite; failure aborts the search.
    #[default]
    Required,
    /// Recording is attempted, but the search runs even if it fails.
    BestEffort,
}

impl std::str::FromStr for HistoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "required" => Ok(HistoryPolicy::Required),
            "best-effort" | "best_effort" | "besteffort" => Ok(HistoryPolicy::BestEffort),
            _ => Err(format!("Invalid history policy: {s}")),
        }
    }
}

/// Search orchestration configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchConfig {
    pub history_policy: HistoryPolicy,
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Provider overrides
        config.omdb.api_key = std::env::var("MARQUEE_OMDB_API_KEY")
            .or_else(|_| std::env::var("OMDB_API_KEY"))
            .ok();

        if let Ok(base_url) = std::env::var("MARQUEE_OMDB_BASE_URL") {
            config.omdb.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MARQUEE_REQUEST_TIMEOUT")
            && let Ok(seconds) = timeout.parse::<u64>()
        {
            config.omdb.request_timeout = Duration::from_secs(seconds);
        }

        // Storage overrides
        if let Ok(database_url) = std::env::var("MARQUEE_DATABASE_URL") {
            config.storage.database_url = database_url;
        }

        if let Ok(policy) = std::env::var("MARQUEE_HISTORY_POLICY") {
            config.search.history_policy = parse_history_policy(&policy);
        }

        config
    }

    /// Creates a configuration for tests against a local fake upstream.
    ///
    /// `database_url` normally points into a temporary directory.
    pub fn for_testing(base_url: &str, database_url: &str) -> Self {
        Self {
            omdb: OmdbConfig {
                api_key: Some("test-key".to_string()),
                base_url: base_url.to_string(),
                request_timeout: Duration::from_secs(2),
                ..Default::default()
            },
            storage: StorageConfig {
                database_url: database_url.to_string(),
                ..Default::default()
            },
            search: SearchConfig::default(),
        }
    }
}

/// Parses an overridden history policy, keeping the default for values
/// that name no policy.
fn parse_history_policy(raw: &str) -> HistoryPolicy {
    raw.trim().parse().unwrap_or_else(|e: String| {
        let fallback = HistoryPolicy::default();
        tracing::warn!(value = raw, error = %e, ?fallback, "Ignoring MARQUEE_HISTORY_POLICY");
        fallback
    })
}
