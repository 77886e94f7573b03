// src/checker/resolve.rs
// =============================================================================
// This module turns strings into absolute URLs.
//
// Two jobs:
// - parse_absolute: validate the page URL the user gave us
// - resolve_media: resolve a (possibly relative) media reference against the
//   page URL, and enforce the mixed-content policy
//
// Mixed content:
// - A page served over https must only pull in https resources
// - A secure page referencing http://... (or any other scheme) is a policy
//   violation that stops the whole run, not a per-URL failure
// =============================================================================

use url::Url;

use crate::error::CheckError;

use super::html::MediaReference;

// Parses the user-supplied page URL
//
// The URL must have a scheme and a host. Relative input like "/index.html"
// or host-less input like "mailto:someone@example.com" is rejected.
//
// Example:
//   "https://example.com/page" -> Ok(Url)
//   "example.com/page"         -> Err(InvalidUrl)
pub fn parse_absolute(raw: &str) -> Result<Url, CheckError> {
    let url = Url::parse(raw).map_err(|e| CheckError::InvalidUrl {
        input: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !url.has_host() {
        return Err(CheckError::InvalidUrl {
            input: raw.to_string(),
            reason: "must be an absolute URL".to_string(),
        });
    }

    Ok(url)
}

// Resolves a media reference against the page URL
//
// Url::join follows the standard resolution rules:
//   base = "https://example.com/blog/post"
//   "img/a.png"            -> "https://example.com/blog/img/a.png"
//   "/a.png"               -> "https://example.com/a.png"
//   "//cdn.example.com/a"  -> "https://cdn.example.com/a"
//   "?v=2"                 -> "https://example.com/blog/post?v=2"
pub fn resolve_media(base: &Url, reference: &MediaReference) -> Result<Url, CheckError> {
    let resolved = base.join(reference.as_str()).map_err(|e| CheckError::InvalidUrl {
        input: reference.as_str().to_string(),
        reason: e.to_string(),
    })?;

    if base.scheme() == "https" && resolved.scheme() != "https" {
        return Err(CheckError::MixedContent {
            page: base.to_string(),
            url: resolved.to_string(),
        });
    }

    Ok(resolved)
}

// Resolves every reference in order, stopping at the first violation
//
// Nothing gets fetched until this returns Ok, so a mixed-content reference
// late in the page still prevents every earlier reference from being checked.
pub fn resolve_all(base: &Url, references: &[MediaReference]) -> Result<Vec<Url>, CheckError> {
    references
        .iter()
        .map(|reference| resolve_media(base, reference))
        .collect()
}
