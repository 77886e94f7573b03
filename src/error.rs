// src/error.rs
// =============================================================================
// Error types for the media checker.
//
// There are three layers of errors:
// - CheckError: something that makes the whole run meaningless
//   (bad page URL, page not fetchable, mixed content).
//   These stop the run immediately.
// - FetchError: why a single HTTP GET did not produce a response.
// - FailureKind: why a single media URL was reported as broken.
//   These are collected into the report, they never stop the run.
//
// Rust concepts:
// - thiserror: derive Display and std::error::Error for our enums
// - Enums with data: each variant carries the details it needs
// =============================================================================

use serde::Serialize;
use thiserror::Error;

/// Fatal errors that abort a validation run before a report is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("HTTP/S mixed content error: {url} referenced from secure page {page}")]
    MixedContent { page: String, url: String },

    #[error("failed to fetch page {url}: {reason}")]
    PageFetch { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Why a single GET did not yield a response before the deadline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),
}

/// The error recorded against one media URL in the report.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureKind {
    /// The server answered with something other than 200.
    #[error("bad response status: {0}")]
    BadStatus(u16),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    /// The check task itself never reported back (panicked or was cancelled).
    #[error("check aborted: {0}")]
    Aborted(String),
}

impl From<FetchError> for FailureKind {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => FailureKind::Timeout,
            FetchError::Network(detail) => FailureKind::Network(detail),
        }
    }
}
