// src/checker/mod.rs
// =============================================================================
// This module contains all media checking logic.
//
// Submodules:
// - resolve: page URL validation, relative URL resolution, mixed content
// - fetch: a single GET under a deadline
// - html: extracts media references from HTML pages
// - check: checks many media URLs concurrently
// - report: the pass/fail outcome of a run
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod check;
mod fetch;
mod html;
mod report;
mod resolve;

// Re-export public items from submodules
// This lets users write `checker::Fetcher` instead of
// `checker::fetch::Fetcher`
pub use check::ConcurrentChecker;
pub use fetch::Fetcher;
pub use html::extract_media_urls;
pub use report::{Failure, Report};
pub use resolve::{parse_absolute, resolve_all};
