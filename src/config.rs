//! Configuration for the conformance harness.
//!
//! Supports both programmatic construction and environment variable
//! overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `POSTS_BASE_URL` | https://jsonplaceholder.typicode.com | Base URL of the service under test |
//! | `POSTS_REQUEST_TIMEOUT` | 30 | Per-request wall-clock budget (seconds) |
//! | `POSTS_LOG_LEVEL` | info | Log level |

use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::error::{HarnessError, HarnessResult};

/// Configuration for a conformance run.
///
/// Construct from command line arguments with [`HarnessConfig::parse`],
/// from the environment, or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "posts-conformance")]
#[command(about = "Conformance harness for the posts collection API")]
pub struct HarnessConfig {
    /// Base URL of the service under test.
    #[arg(
        long,
        env = "POSTS_BASE_URL",
        default_value = "https://jsonplaceholder.typicode.com"
    )]
    pub base_url: String,

    /// Per-request wall-clock budget, in seconds.
    #[arg(long, env = "POSTS_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "POSTS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            request_timeout: 30,
            log_level: "info".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Parses the configured base URL.
    pub fn parsed_base_url(&self) -> HarnessResult<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| HarnessError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(HarnessError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "URL cannot serve as a base".to_string(),
            });
        }
        Ok(url)
    }

    /// Returns the per-request budget as a duration.
    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if let Err(e) = self.parsed_base_url() {
            errors.push(e.to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Creates a configuration aimed at a local stand-in, with a short
    /// budget and verbose logging.
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            request_timeout: 5,
            log_level: "debug".to_string(),
        }
    }
}
