//! Local stand-in for the posts service.
//!
//! Reproduces the live service's observable behavior, including its
//! quirks: filters matching nothing answer an empty array, writes are
//! echoed but never stored, and updating an id the service has never seen
//! answers 500. Switchable behaviors cover the stricter readings and
//! failure paths the scenarios probe for.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use serde::Deserialize;

use posts_conformance::{Dataset, Post};

/// Switchable stand-in behaviors.
#[derive(Debug, Clone, Default)]
pub struct Behavior {
    /// Answer 404 instead of an empty array when a filter matches nothing.
    pub strict_not_found: bool,
    /// Serve list responses in reverse table order.
    pub reverse_order: bool,
    /// Delay every response by this long.
    pub delay: Option<Duration>,
    /// Serve an HTML page instead of JSON from every endpoint.
    pub garbled: bool,
}

#[derive(Clone)]
struct StandInState {
    dataset: Arc<Dataset>,
    behavior: Arc<Behavior>,
}

/// Builds the stand-in router over the given dataset.
pub fn router(dataset: Dataset, behavior: Behavior) -> Router {
    let state = StandInState {
        dataset: Arc::new(dataset),
        behavior: Arc::new(behavior),
    };
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", put(update_post))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListFilter {
    user_id: Option<u64>,
    id: Option<u64>,
}

async fn list_posts(
    State(state): State<StandInState>,
    Query(filter): Query<ListFilter>,
) -> Response {
    if let Some(delay) = state.behavior.delay {
        tokio::time::sleep(delay).await;
    }
    if state.behavior.garbled {
        return garbled_page();
    }

    let mut posts: Vec<Post> = state
        .dataset
        .posts()
        .iter()
        .filter(|p| filter.user_id.is_none_or(|u| p.user_id == u))
        .filter(|p| filter.id.is_none_or(|i| p.id == i))
        .cloned()
        .collect();

    let filtered = filter.user_id.is_some() || filter.id.is_some();
    if posts.is_empty() && filtered && state.behavior.strict_not_found {
        return StatusCode::NOT_FOUND.into_response();
    }

    if state.behavior.reverse_order {
        posts.reverse();
    }
    axum::Json(posts).into_response()
}

async fn create_post(
    State(state): State<StandInState>,
    axum::Json(post): axum::Json<Post>,
) -> Response {
    if let Some(delay) = state.behavior.delay {
        tokio::time::sleep(delay).await;
    }
    if state.behavior.garbled {
        return garbled_page();
    }

    // Echoed back, never stored.
    (StatusCode::CREATED, axum::Json(post)).into_response()
}

async fn update_post(
    State(state): State<StandInState>,
    Path(id): Path<u64>,
    axum::Json(post): axum::Json<Post>,
) -> Response {
    if let Some(delay) = state.behavior.delay {
        tokio::time::sleep(delay).await;
    }
    if state.behavior.garbled {
        return garbled_page();
    }

    // The live service blows up rather than answering 404 here.
    if !state.dataset.posts().iter().any(|p| p.id == id) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    // Echoed back, never stored.
    axum::Json(post).into_response()
}

fn garbled_page() -> Response {
    (
        [(header::CONTENT_TYPE, "text/html")],
        "<!doctype html><html><body>placeholder</body></html>",
    )
        .into_response()
}
