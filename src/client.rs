//! HTTP client for the posts collection API.
//!
//! A thin wrapper over [`reqwest`] covering the endpoints the harness
//! exercises: list reads with `userId`/`id` filters, create, and update.
//! Every endpoint is logged before the request leaves, and any non-success
//! status surfaces as an error carrying the canonical reason phrase.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::model::Post;

/// Client for the posts endpoints of the service under test.
///
/// Cloning is cheap; clones share the underlying connection pool and carry
/// no per-request state.
#[derive(Debug, Clone)]
pub struct PostsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PostsClient {
    /// Builds a client from the harness configuration.
    pub fn new(config: &HarnessConfig) -> HarnessResult<Self> {
        Self::with_base_url(config.parsed_base_url()?, config.budget())
    }

    /// Builds a client against an explicit base URL with the given request
    /// timeout.
    pub fn with_base_url(base_url: Url, timeout: Duration) -> HarnessResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| HarnessError::Client { source })?;
        Ok(Self { http, base_url })
    }

    /// Fetches the full posts collection (`GET /posts`).
    pub async fn all(&self) -> HarnessResult<Vec<Post>> {
        let url = self.endpoint(&["posts"])?;
        self.get_json(url).await
    }

    /// Fetches the posts owned by a user (`GET /posts?userId={user_id}`).
    pub async fn by_user_id(&self, user_id: u64) -> HarnessResult<Vec<Post>> {
        let mut url = self.endpoint(&["posts"])?;
        url.query_pairs_mut()
            .append_pair("userId", &user_id.to_string());
        self.get_json(url).await
    }

    /// Fetches the posts with a given id (`GET /posts?id={id}`).
    pub async fn by_id(&self, id: u64) -> HarnessResult<Vec<Post>> {
        let mut url = self.endpoint(&["posts"])?;
        url.query_pairs_mut().append_pair("id", &id.to_string());
        self.get_json(url).await
    }

    /// Creates a post (`POST /posts`) and returns the service's echo of it.
    pub async fn create(&self, post: &Post) -> HarnessResult<Post> {
        let url = self.endpoint(&["posts"])?;
        debug!(url = %url, "calling endpoint");
        let response = self
            .http
            .post(url.clone())
            .json(post)
            .send()
            .await
            .map_err(|source| HarnessError::Transport {
                url: url.to_string(),
                source,
            })?;
        Self::decode(url, "POST", response).await
    }

    /// Updates a post (`PUT /posts/{id}`) and returns the service's echo of
    /// it.
    pub async fn update(&self, post: &Post) -> HarnessResult<Post> {
        let id = post.id.to_string();
        let url = self.endpoint(&["posts", &id])?;
        debug!(url = %url, "calling endpoint");
        let response = self
            .http
            .put(url.clone())
            .json(post)
            .send()
            .await
            .map_err(|source| HarnessError::Transport {
                url: url.to_string(),
                source,
            })?;
        Self::decode(url, "PUT", response).await
    }

    /// Joins path segments onto the base URL.
    fn endpoint(&self, segments: &[&str]) -> HarnessResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| HarnessError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: "URL cannot serve as a base".to_string(),
                })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> HarnessResult<T> {
        debug!(url = %url, "calling endpoint");
        let response =
            self.http
                .get(url.clone())
                .send()
                .await
                .map_err(|source| HarnessError::Transport {
                    url: url.to_string(),
                    source,
                })?;
        Self::decode(url, "GET", response).await
    }

    /// Checks the status line, then decodes the body.
    async fn decode<T: DeserializeOwned>(
        url: Url,
        method: &str,
        response: reqwest::Response,
    ) -> HarnessResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(HarnessError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| HarnessError::Transport {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| HarnessError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
