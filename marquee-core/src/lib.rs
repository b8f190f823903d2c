//! Marquee Core - Shared building blocks
//!
//! This crate provides the pieces every Marquee component depends on:
//! configuration, validated caller input, tracing setup, and the
//! persistent store of recently searched movie titles.

pub mod config;
pub mod input;
pub mod storage;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::{HistoryPolicy, MarqueeConfig};
pub use input::{ExternalId, SearchTitle, ValidationError};
pub use storage::{RecentSearch, RecentSearchStore, SearchRecord, StorageError};

/// Core errors that can bubble up from any Marquee subsystem.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Validation(e) => e.to_string(),
            MarqueeError::Storage(StorageError::Connection { .. }) => {
                "Could not open the search history database".to_string()
            }
            MarqueeError::Storage(_) => "Search history is unavailable".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(self, MarqueeError::Validation(_))
    }
}
