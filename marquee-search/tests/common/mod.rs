//! Local fake of the OMDb API for gateway tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use marquee_core::config::OmdbConfig;
use parking_lot::Mutex;

/// One scripted upstream answer.
#[derive(Debug, Clone)]
pub struct FakeReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl FakeReply {
    pub fn json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Default)]
struct FakeState {
    hits: AtomicUsize,
    queries: Mutex<Vec<HashMap<String, String>>>,
    replies: Mutex<VecDeque<FakeReply>>,
}

/// Running fake upstream. Replies are served in order; the last one repeats.
pub struct FakeOmdb {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeOmdb {
    pub async fn start(replies: Vec<FakeReply>) -> Self {
        let state = Arc::new(FakeState {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        });

        let app = Router::new()
            .route("/", get(respond))
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/"),
            state,
        }
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Query parameters of every request received so far.
    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.state.queries.lock().clone()
    }

    pub fn config(&self, api_key: Option<&str>) -> OmdbConfig {
        OmdbConfig {
            api_key: api_key.map(str::to_string),
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_millis(500),
            ..Default::default()
        }
    }
}

async fn respond(
    State(state): State<Arc<FakeState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.queries.lock().push(params);

    let reply = {
        let mut replies = state.replies.lock();
        if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        }
    };
    let Some(reply) = reply else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

pub const MATRIX_SEARCH: &str = r#"{
    "Search": [
        {"Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie", "Poster": "https://img/matrix.jpg"},
        {"Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215", "Type": "movie", "Poster": "https://img/reloaded.jpg"}
    ],
    "totalResults": "2",
    "Response": "True"
}"#;

pub const MATRIX_DETAILS: &str = r#"{
    "Title": "The Matrix", "Year": "1999", "Rated": "R", "Runtime": "136 min",
    "Genre": "Action, Sci-Fi", "Plot": "When a beautiful stranger leads computer hacker Neo to a forbidding underworld...",
    "Ratings": [{"Source": "Internet Movie Database", "Value": "8.7/10"}, {"Source": "Rotten Tomatoes", "Value": "83%"}],
    "imdbRating": "8.7", "imdbID": "tt0133093", "Type": "movie", "Response": "True"
}"#;

pub const NOT_FOUND: &str = r#"{"Response":"False","Error":"Movie not found!"}"#;
