//! # posts-conformance - Conformance Harness for the Posts Collection API
//!
//! This crate exercises the CRUD-style endpoints of a public posts
//! collection REST API and validates every response against a hardcoded
//! reference dataset. It is a client-side harness: it issues HTTP
//! requests, decodes JSON, and compares data; it implements no server and
//! no protocol.
//!
//! The two pieces that carry the weight are the order-independent
//! collection comparator ([`compare`]) and the validation policy for
//! endpoints whose live behavior diverges from the documented contract
//! ([`scenario`]): queries matching nothing are answered with an empty
//! array rather than 404, and writes are echoed back but never stored.
//! Both divergences are exercised and reported as findings, never papered
//! over.
//!
//! ## Exercised Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | list | GET | `/posts` |
//! | filter by user | GET | `/posts?userId={userId}` |
//! | filter by id | GET | `/posts?id={id}` |
//! | create | POST | `/posts` |
//! | update | PUT | `/posts/{id}` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! use posts_conformance::{ConformanceSuite, Dataset, HarnessConfig, PostsClient, scenario_table};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = HarnessConfig::default();
//!     let client = PostsClient::new(&config)?;
//!     let dataset = Dataset::canonical();
//!     let scenarios = scenario_table(&dataset);
//!     let suite = ConformanceSuite::new(client, dataset, config.budget());
//!
//!     for scenario in &scenarios {
//!         suite.run(scenario).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! The harness is configured via command line flags or environment
//! variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `POSTS_BASE_URL` | https://jsonplaceholder.typicode.com | Base URL of the service under test |
//! | `POSTS_REQUEST_TIMEOUT` | 30 | Per-request wall-clock budget (seconds) |
//! | `POSTS_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//!
//! ## Architecture
//!
//! - [`model`] - The post record and its wire format
//! - [`fixtures`] - The canonical reference dataset and its filtered views
//! - [`compare`] - Multiset comparison with descriptive failure detail
//! - [`client`] - HTTP client for the posts endpoints
//! - [`scenario`] - The scenario table and the generic validation flows
//! - [`config`] - Harness configuration
//! - [`error`] - Error types

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod compare;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod scenario;

// Re-export commonly used types
pub use client::PostsClient;
pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use fixtures::Dataset;
pub use model::Post;
pub use scenario::{ConformanceSuite, Expectation, Persistence, Scenario, scenario_table};

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("posts_conformance={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
