// src/validate/mod.rs
// =============================================================================
// This module runs one end-to-end validation of a page.
//
// Steps:
// - Validate the page URL
// - Fetch the page (must return 200)
// - Extract media references from its HTML
// - Resolve them against the page URL (mixed content stops everything)
// - Check every resolved URL concurrently under one shared deadline
// - Hand back a report
//
// Rust concepts:
// - Structs that own their configuration (ValidationRun)
// - Early returns with ? for fatal errors
// =============================================================================

mod run;

// Re-export the run type
pub use run::ValidationRun;
