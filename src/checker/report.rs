// src/checker/report.rs
// =============================================================================
// The outcome of a validation run.
//
// A run passes only when every media URL came back with status 200.
// Failures are kept in the order they were discovered (the order their
// checks finished), which is not the order they appear on the page.
// =============================================================================

use serde::Serialize;
use url::Url;

use crate::error::FailureKind;

/// One media URL that did not check out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub url: Url,
    pub error: FailureKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// The page whose media was checked
    pub page: Url,
    /// How many media URLs were checked
    pub checked: usize,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn new(page: Url, checked: usize, failures: Vec<Failure>) -> Self {
        Self {
            page,
            checked,
            failures,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}
