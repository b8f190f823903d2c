//! Validated caller input.
//!
//! Blank input is rejected at construction, so every component that takes
//! a [`SearchTitle`] or [`ExternalId`] can rely on a non-empty value.

use std::fmt;

/// Rejected caller input. Never logged as a system fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title parameter is required")]
    BlankTitle,

    #[error("IMDB ID parameter is required")]
    BlankExternalId,
}

/// Movie title exactly as submitted by the caller, never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTitle(String);

impl SearchTitle {
    /// Accepts `raw` unchanged unless it is only whitespace.
    ///
    /// # Errors
    ///
    /// - `ValidationError::BlankTitle` - If `raw` is empty after trimming
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        Ok(Self(raw.to_string()))
    }

    /// Display form of the title.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive key used to deduplicate titles.
    pub fn normalized_key(&self) -> String {
        normalize_title(&self.0)
    }
}

impl fmt::Display for SearchTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upstream identifier of a single movie (an IMDb id such as `tt1375666`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalId(String);

impl ExternalId {
    /// Trims `raw` and accepts it if anything is left.
    ///
    /// # Errors
    ///
    /// - `ValidationError::BlankExternalId` - If `raw` is empty after trimming
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::BlankExternalId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Folds a title for case-insensitive comparison.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}
