//! CLI command implementations

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use marquee_core::{MarqueeConfig, MarqueeError, RecentSearchStore};
use marquee_search::{LookupOutcome, OmdbGateway, SearchOrchestrator};
use serde::Serialize;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search movies by title and remember the title
    Search {
        /// Movie title to search for
        title: String,
    },
    /// Show full details for one movie
    Details {
        /// IMDb identifier, e.g. tt0133093
        imdb_id: String,
    },
    /// List the most recent searches, newest first
    Recent,
}

/// Handle the CLI command
///
/// # Errors
/// - Configuration or startup failures (database, HTTP client)
pub async fn handle_command(command: Commands) -> anyhow::Result<ExitCode> {
    let config = MarqueeConfig::from_env();
    let orchestrator = build_orchestrator(&config).await?;

    let code = match command {
        Commands::Search { title } => report(orchestrator.search(&title).await)?,
        Commands::Details { imdb_id } => report(orchestrator.details(&imdb_id).await)?,
        Commands::Recent => {
            let recent = orchestrator.recent_searches().await;
            if recent.is_empty() {
                println!("No recent searches.");
            } else {
                for entry in recent {
                    println!("{}  {}", entry.last_touched_at.to_rfc3339(), entry.title);
                }
            }
            ExitCode::SUCCESS
        }
    };

    orchestrator.store().close().await;
    Ok(code)
}

async fn build_orchestrator(config: &MarqueeConfig) -> anyhow::Result<SearchOrchestrator> {
    let store = RecentSearchStore::open(&config.storage)
        .await
        .map_err(MarqueeError::from)
        .with_context(|| format!("opening {}", config.storage.database_url))?;
    let gateway = OmdbGateway::new(&config.omdb).context("building OMDb client")?;

    if config.omdb.usable_api_key().is_none() {
        tracing::warn!("No OMDb API key configured; set MARQUEE_OMDB_API_KEY");
    }

    Ok(SearchOrchestrator::new(
        store,
        Arc::new(gateway),
        config.search.history_policy,
    ))
}

/// Prints an outcome and picks the matching exit code.
fn report<T: Serialize>(outcome: LookupOutcome<T>) -> anyhow::Result<ExitCode> {
    let code = match outcome {
        LookupOutcome::Found(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            ExitCode::SUCCESS
        }
        LookupOutcome::NotFound(message) => {
            eprintln!("{message}");
            ExitCode::from(1)
        }
        LookupOutcome::InvalidInput(e) => {
            eprintln!("{}", MarqueeError::from(e).user_message());
            ExitCode::from(2)
        }
        LookupOutcome::Unavailable => {
            eprintln!("Movie search is unavailable right now; try again later.");
            ExitCode::from(3)
        }
    };
    Ok(code)
}
