//! OMDb wire schema.
//!
//! Decoding folds every object key to lowercase before matching it against
//! the schema, so `imdbID`, `imdbid` and `IMDBID` are the same field. Keys
//! that collide after folding reject the body. Serialization writes the
//! provider's own field names back out, so payloads pass through unchanged.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::DecodeError;

/// Placeholder the provider uses for absent attributes.
const NOT_AVAILABLE: &str = "N/A";

/// Upstream `Response` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// The lookup matched
    True,
    /// Nothing matched; the body carries an `Error` message
    False,
}

impl ResponseStatus {
    fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("true") {
            Some(ResponseStatus::True)
        } else if value.eq_ignore_ascii_case("false") {
            Some(ResponseStatus::False)
        } else {
            None
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            ResponseStatus::True => "True",
            ResponseStatus::False => "False",
        }
    }
}

impl Serialize for ResponseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ResponseStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ResponseStatus::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized response status '{raw}'")))
    }
}

/// Result of a title search (`s=<title>&page=1&type=movie`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matches on the requested page; empty when `response` is `False`
    #[serde(rename(serialize = "Search", deserialize = "search"), default)]
    pub search: Vec<MovieSummary>,
    /// Total number of matches across all pages, as sent upstream
    #[serde(
        rename(serialize = "totalResults", deserialize = "totalresults"),
        skip_serializing_if = "Option::is_none"
    )]
    pub total_results: Option<String>,
    /// Whether the provider found anything
    #[serde(rename(serialize = "Response", deserialize = "response"))]
    pub response: ResponseStatus,
    /// Provider message when `response` is `False`, e.g. `Movie not found!`
    #[serde(
        rename(serialize = "Error", deserialize = "error"),
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Parsed `totalResults`.
    pub fn total_results_count(&self) -> Option<u32> {
        self.total_results.as_deref()?.trim().parse().ok()
    }
}

/// One entry of a search result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Display title
    #[serde(rename(serialize = "Title", deserialize = "title"))]
    pub title: String,
    /// Release year or year range
    #[serde(rename(serialize = "Year", deserialize = "year"))]
    pub year: String,
    /// IMDb identifier, usable with a details lookup
    #[serde(rename(serialize = "imdbID", deserialize = "imdbid"))]
    pub imdb_id: String,
    /// `movie`, `series` or `episode`
    #[serde(rename(serialize = "Type", deserialize = "type"))]
    pub kind: String,
    /// Poster URL or `N/A`
    #[serde(
        rename(serialize = "Poster", deserialize = "poster"),
        skip_serializing_if = "Option::is_none"
    )]
    pub poster: Option<String>,
}

impl MovieSummary {
    /// Poster URL, if the provider has one.
    pub fn poster_url(&self) -> Option<&str> {
        available(self.poster.as_deref())
    }

    /// First year of `year`, which may be a range such as `2019–2021`.
    pub fn release_year(&self) -> Option<u16> {
        leading_year(&self.year)
    }
}

/// Rating from a single source, e.g. `Rotten Tomatoes` / `87%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating source, e.g. `Internet Movie Database`
    #[serde(rename(serialize = "Source", deserialize = "source"))]
    pub source: String,
    /// Score in the source's own format
    #[serde(rename(serialize = "Value", deserialize = "value"))]
    pub value: String,
}

/// Full record of one movie (`i=<id>&plot=full`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// Display title
    #[serde(rename(serialize = "Title", deserialize = "title"))]
    pub title: String,
    /// Release year or year range
    #[serde(rename(serialize = "Year", deserialize = "year"))]
    pub year: Option<String>,
    /// Certification, e.g. `PG-13`
    #[serde(rename(serialize = "Rated", deserialize = "rated"))]
    pub rated: Option<String>,
    /// Release date as written upstream
    #[serde(rename(serialize = "Released", deserialize = "released"))]
    pub released: Option<String>,
    /// Running time, e.g. `136 min`
    #[serde(rename(serialize = "Runtime", deserialize = "runtime"))]
    pub runtime: Option<String>,
    /// Comma-separated genres
    #[serde(rename(serialize = "Genre", deserialize = "genre"))]
    pub genre: Option<String>,
    /// Comma-separated directors
    #[serde(rename(serialize = "Director", deserialize = "director"))]
    pub director: Option<String>,
    /// Comma-separated writers
    #[serde(rename(serialize = "Writer", deserialize = "writer"))]
    pub writer: Option<String>,
    /// Comma-separated lead actors
    #[serde(rename(serialize = "Actors", deserialize = "actors"))]
    pub actors: Option<String>,
    /// Full-length plot
    #[serde(rename(serialize = "Plot", deserialize = "plot"))]
    pub plot: Option<String>,
    /// Comma-separated languages
    #[serde(rename(serialize = "Language", deserialize = "language"))]
    pub language: Option<String>,
    /// Comma-separated production countries
    #[serde(rename(serialize = "Country", deserialize = "country"))]
    pub country: Option<String>,
    /// Awards summary
    #[serde(rename(serialize = "Awards", deserialize = "awards"))]
    pub awards: Option<String>,
    /// Poster URL or `N/A`
    #[serde(rename(serialize = "Poster", deserialize = "poster"))]
    pub poster: Option<String>,
    /// Absent ratings decode as an empty list
    #[serde(rename(serialize = "Ratings", deserialize = "ratings"), default)]
    pub ratings: Vec<Rating>,
    /// Metacritic score
    #[serde(rename(serialize = "Metascore", deserialize = "metascore"))]
    pub metascore: Option<String>,
    /// IMDb rating, see [`MovieDetail::rating_value`]
    #[serde(rename(serialize = "imdbRating", deserialize = "imdbrating"))]
    pub imdb_rating: Option<String>,
    /// IMDb vote count with thousands separators
    #[serde(rename(serialize = "imdbVotes", deserialize = "imdbvotes"))]
    pub imdb_votes: Option<String>,
    /// IMDb identifier
    #[serde(rename(serialize = "imdbID", deserialize = "imdbid"))]
    pub imdb_id: String,
    /// `movie`, `series` or `episode`
    #[serde(rename(serialize = "Type", deserialize = "type"))]
    pub kind: Option<String>,
    /// DVD release date
    #[serde(rename(serialize = "DVD", deserialize = "dvd"))]
    pub dvd: Option<String>,
    /// Box office gross, e.g. `$171,479,930`
    #[serde(rename(serialize = "BoxOffice", deserialize = "boxoffice"))]
    pub box_office: Option<String>,
    /// Production company
    #[serde(rename(serialize = "Production", deserialize = "production"))]
    pub production: Option<String>,
    /// Official website
    #[serde(rename(serialize = "Website", deserialize = "website"))]
    pub website: Option<String>,
}

impl MovieDetail {
    /// IMDb rating on the 0-10 scale.
    pub fn rating_value(&self) -> Option<f32> {
        available(self.imdb_rating.as_deref())?.parse().ok()
    }

    /// Poster URL, if the provider has one.
    pub fn poster_url(&self) -> Option<&str> {
        available(self.poster.as_deref())
    }

    /// Release year, or the first year of a range.
    pub fn release_year(&self) -> Option<u16> {
        leading_year(self.year.as_deref()?)
    }
}

/// Result of a details lookup. `movie` is present exactly when `response` is `True`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetailResponse {
    /// Whether the provider found the movie
    pub response: ResponseStatus,
    /// Provider message when `response` is `False`
    pub error: Option<String>,
    /// Decoded record when `response` is `True`
    pub movie: Option<MovieDetail>,
}

#[derive(Deserialize)]
struct StatusEnvelope {
    response: Option<String>,
    error: Option<String>,
}

/// Decodes a search response body.
///
/// # Errors
///
/// - `DecodeError::Json` - If the body is not JSON or a present field has the wrong shape
/// - `DecodeError::DuplicateField` - If two keys collide once case is ignored
/// - `DecodeError::MissingField` - If `Response` is absent, or `Search` is absent on success
/// - `DecodeError::InvalidStatus` - If `Response` is neither "True" nor "False"
pub fn decode_search_response(body: &str) -> Result<SearchResponse, DecodeError> {
    let folded = fold_keys(serde_json::from_str(body)?)?;
    let envelope = decode_envelope(&folded)?;

    if envelope.response == ResponseStatus::True && folded.get("search").is_none() {
        return Err(DecodeError::MissingField { field: "Search" });
    }

    Ok(serde_json::from_value(folded)?)
}

/// Decodes a movie details response body.
///
/// # Errors
///
/// - `DecodeError::Json` - If the body is not JSON or a present field has the wrong shape
/// - `DecodeError::DuplicateField` - If two keys collide once case is ignored
/// - `DecodeError::MissingField` - If `Response` is absent, or `Title`/`imdbID` are absent on success
/// - `DecodeError::InvalidStatus` - If `Response` is neither "True" nor "False"
pub fn decode_movie_detail(body: &str) -> Result<MovieDetailResponse, DecodeError> {
    let folded = fold_keys(serde_json::from_str(body)?)?;
    let envelope = decode_envelope(&folded)?;

    let movie = match envelope.response {
        ResponseStatus::False => None,
        ResponseStatus::True => {
            for (key, field) in [("title", "Title"), ("imdbid", "imdbID")] {
                if folded.get(key).is_none_or(Value::is_null) {
                    return Err(DecodeError::MissingField { field });
                }
            }
            Some(serde_json::from_value(folded)?)
        }
    };

    Ok(MovieDetailResponse {
        response: envelope.response,
        error: envelope.error,
        movie,
    })
}

fn decode_envelope(folded: &Value) -> Result<ResponseEnvelope, DecodeError> {
    let envelope = StatusEnvelope::deserialize(folded)?;
    let raw = envelope
        .response
        .ok_or(DecodeError::MissingField { field: "Response" })?;
    let response =
        ResponseStatus::parse(&raw).ok_or(DecodeError::InvalidStatus { value: raw })?;

    Ok(ResponseEnvelope {
        response,
        error: envelope.error,
    })
}

struct ResponseEnvelope {
    response: ResponseStatus,
    error: Option<String>,
}

/// Lowercases every object key, recursively.
fn fold_keys(value: Value) -> Result<Value, DecodeError> {
    match value {
        Value::Object(map) => {
            let mut folded = Map::with_capacity(map.len());
            for (key, inner) in map {
                let key = key.to_lowercase();
                if folded.contains_key(&key) {
                    return Err(DecodeError::DuplicateField { field: key });
                }
                folded.insert(key, fold_keys(inner)?);
            }
            Ok(Value::Object(folded))
        }
        Value::Array(items) => items
            .into_iter()
            .map(fold_keys)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Ok(other),
    }
}

fn available(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty() && *v != NOT_AVAILABLE)
}

fn leading_year(year: &str) -> Option<u16> {
    let digits: String = year.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
