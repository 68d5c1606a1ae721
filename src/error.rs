//! Error types for the conformance harness.
//!
//! Three kinds of failure exist: transport or non-success HTTP status,
//! fatal to the scenario unless explicitly expected; JSON decoding
//! failure, fatal; and data mismatch, raised by the comparator with a
//! descriptive detail. There are no retries, and failures stay scoped to
//! the scenario that raised them.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::compare::SetDiff;

/// The primary error type for harness operations.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The HTTP client could not be constructed.
    #[error("failed to construct HTTP client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success HTTP status. The message
    /// carries the canonical reason phrase; absence detection matches on
    /// it.
    #[error("{method} {url} returned {status} {reason}")]
    Status {
        method: String,
        url: String,
        status: u16,
        reason: String,
    },

    /// The response body could not be decoded as the expected JSON shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two collections did not hold the same multiset of posts.
    #[error("{message}\n{diff}")]
    Mismatch { message: String, diff: SetDiff },

    /// An absence-flagged query was answered successfully.
    #[error("expected an absence error for {query}, got a successful response")]
    ExpectedAbsence { query: String },

    /// The query exceeded the wall-clock budget.
    #[error("{query} took {elapsed_ms}ms, over the {budget_ms}ms budget")]
    Deadline {
        query: String,
        elapsed_ms: u128,
        budget_ms: u128,
    },

    /// A spawned request task failed to complete.
    #[error("request task failed: {message}")]
    Task { message: String },

    /// The configured base URL is unusable.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl HarnessError {
    /// True when this error denotes an absent resource.
    ///
    /// The service signals absence through its HTTP status line, so the
    /// check is a case-insensitive match for the `Not Found` reason phrase
    /// in the rendered message. Every other variant keeps the phrase out
    /// of its message.
    pub fn denotes_absence(&self) -> bool {
        self.to_string().to_ascii_lowercase().contains("not found")
    }
}

/// Result type alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare;
    use crate::model::Post;

    fn status_error(status: u16, reason: &str) -> HarnessError {
        HarnessError::Status {
            method: "GET".to_string(),
            url: "http://example.test/posts?userId=0".to_string(),
            status,
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_status_message_carries_reason_phrase() {
        let err = status_error(404, "Not Found");
        assert!(err.to_string().contains("404 Not Found"));
    }

    #[test]
    fn test_not_found_status_denotes_absence() {
        assert!(status_error(404, "Not Found").denotes_absence());
        assert!(!status_error(500, "Internal Server Error").denotes_absence());
    }

    #[test]
    fn test_mismatch_does_not_denote_absence() {
        let err = compare::assert_same_elements(
            &[Post::new(1, 1, "a", "b")],
            &[],
            "collections differ",
        )
        .unwrap_err();
        assert!(!err.denotes_absence());
    }

    #[test]
    fn test_expected_absence_does_not_denote_absence() {
        let err = HarnessError::ExpectedAbsence {
            query: "GET /posts?userId=0".to_string(),
        };
        assert!(!err.denotes_absence());
    }

    #[test]
    fn test_deadline_message_names_both_durations() {
        let err = HarnessError::Deadline {
            query: "GET /posts".to_string(),
            elapsed_ms: 31000,
            budget_ms: 30000,
        };
        let rendered = err.to_string();
        assert!(rendered.contains("31000ms"));
        assert!(rendered.contains("30000ms"));
    }
}
