//! Terminal outcomes of a lookup request.

use marquee_core::ValidationError;

/// How a search or details request ended.
///
/// The boundary layer maps these onto its own status signaling, e.g.
/// 400 / 500 / 404 / 200 for HTTP.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome<T> {
    /// Required input was blank; nothing was recorded or queried.
    InvalidInput(ValidationError),
    /// Storage or the upstream provider could not produce an answer.
    Unavailable,
    /// Provider answered but had no match, with its message.
    NotFound(String),
    /// Provider answered with a match.
    Found(T),
}

impl<T> LookupOutcome<T> {
    /// True for `Found`.
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    /// Payload of a `Found` outcome.
    pub fn found(self) -> Option<T> {
        match self {
            LookupOutcome::Found(payload) => Some(payload),
            _ => None,
        }
    }
}
