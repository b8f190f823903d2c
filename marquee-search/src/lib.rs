//! Marquee Search - Movie lookup and search history
//!
//! Queries the OMDb movie metadata API through [`OmdbGateway`] and ties it
//! to the recent-search history in [`SearchOrchestrator`].

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]

pub mod errors;
pub mod metadata;
pub mod outcome;
pub mod providers;
pub mod service;
pub mod types;

// Re-export main types
pub use errors::{DecodeError, GatewayError, MetadataUnavailable};
pub use metadata::OmdbGateway;
pub use outcome::LookupOutcome;
pub use providers::MovieMetadataProvider;
pub use service::SearchOrchestrator;
pub use types::{
    MovieDetail, MovieDetailResponse, MovieSummary, Rating, ResponseStatus, SearchResponse,
};
