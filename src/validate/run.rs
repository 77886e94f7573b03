// src/validate/run.rs
// =============================================================================
// The validation run: one page, one deadline, one report.
//
// How it works:
// 1. Start the clock: the deadline covers everything from here on
// 2. Parse the page URL (fatal if it isn't absolute)
// 3. Fetch the page (fatal on any error or a status other than 200)
// 4. Extract media references from the body (the HTML parser never fails)
// 5. Resolve every reference; a mixed-content reference is fatal and
//    happens before any media request is sent
// 6. Check all resolved URLs concurrently and collect the failures
//
// Fatal problems come back as Err(CheckError) with no partial report.
// Per-URL problems end up in Report::failures.
// =============================================================================

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};
use url::Url;

use crate::checker::{
    extract_media_urls, parse_absolute, resolve_all, ConcurrentChecker, Fetcher, Report,
};
use crate::error::CheckError;

/// One end-to-end check of a page's media.
#[derive(Debug, Clone)]
pub struct ValidationRun {
    page: String,
    budget: Duration,
    fetcher: Fetcher,
}

impl ValidationRun {
    // Parameters:
    //   page: the page URL exactly as the user typed it
    //   budget: total time allowed for the page fetch plus all media checks
    //   fetcher: HTTP client used for every request in this run
    pub fn new(page: impl Into<String>, budget: Duration, fetcher: Fetcher) -> Self {
        Self {
            page: page.into(),
            budget,
            fetcher,
        }
    }

    pub async fn execute(self) -> Result<Report, CheckError> {
        let deadline = Instant::now() + self.budget;

        let page = parse_absolute(&self.page)?;
        info!(
            url = %page,
            scheme = page.scheme(),
            host = page.host_str().unwrap_or_default(),
            path = page.path(),
            "fetching"
        );

        let body = fetch_page(&self.fetcher, &page, deadline).await?;

        self.check_page(page, &body, deadline).await
    }

    // Everything after the page fetch: extract, resolve, check
    //
    // All references are resolved before the first media request goes out,
    // so a mixed-content reference means nothing gets checked at all.
    async fn check_page(
        &self,
        page: Url,
        body: &[u8],
        deadline: Instant,
    ) -> Result<Report, CheckError> {
        let references = extract_media_urls(body);
        info!(number = references.len(), "extracted media URLs");
        for reference in &references {
            debug!(
                element = reference.element(),
                reference = reference.as_str(),
                "found media reference"
            );
        }

        let urls = resolve_all(&page, &references)?;
        let checked = urls.len();

        let checker = ConcurrentChecker::new(self.fetcher.clone());
        let failures = checker.check_all(urls, deadline).await;

        Ok(Report::new(page, checked, failures))
    }
}

// Fetches the page itself
//
// Unlike media checks, any problem here ends the run: without the page
// there is nothing to check.
async fn fetch_page(
    fetcher: &Fetcher,
    url: &Url,
    deadline: Instant,
) -> Result<Vec<u8>, CheckError> {
    let outcome = fetcher
        .fetch(url, deadline)
        .await
        .map_err(|e| CheckError::PageFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !outcome.is_success() {
        return Err(CheckError::PageFetch {
            url: url.to_string(),
            reason: format!("bad response status: {}", outcome.status),
        });
    }

    info!(status = outcome.status, bytes = outcome.body.len(), "retrieved page");
    Ok(outcome.body)
}
