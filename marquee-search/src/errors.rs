//! Error types for movie metadata lookups.

use thiserror::Error;

/// Public outcome of any failed upstream lookup.
///
/// Deliberately carries no detail: callers cannot tell a missing access key
/// from a network failure. The cause is logged where it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Movie metadata provider is unavailable")]
pub struct MetadataUnavailable;

/// Reasons an upstream lookup failed, used for logging only.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No usable access key is configured; no request was sent.
    #[error("OMDb API key is not configured")]
    MissingApiKey,

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection, timeout or body read failure.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {status}")]
    HttpStatus {
        /// Status code returned by the provider
        status: reqwest::StatusCode,
    },

    /// Body did not match the expected schema.
    #[error("Malformed response body: {0}")]
    Decode(#[from] DecodeError),
}

/// Failures while decoding an upstream JSON body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Body is not JSON or does not fit the schema.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Two keys in one object differ only by case.
    #[error("Field '{field}' appears more than once (ignoring case)")]
    DuplicateField {
        /// Lowercased field name
        field: String,
    },

    /// A field required for a successful response is absent.
    #[error("Required field '{field}' is missing")]
    MissingField {
        /// Upstream field name
        field: &'static str,
    },

    /// `Response` holds something other than "True" or "False".
    #[error("Unrecognized response status '{value}'")]
    InvalidStatus {
        /// Raw status value
        value: String,
    },
}
