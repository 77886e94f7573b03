// src/checker/check.rs
// =============================================================================
// This module checks many media URLs at the same time.
//
// How it works:
// 1. Spawn one tokio task per URL; every task gets the same deadline
// 2. Each task does a single GET and decides pass/fail (exactly 200 passes)
// 3. This function is the only place failures are written, and it reads
//    task results one by one as they finish, so no locking is needed
// 4. Return only after every task has reported back
//
// A failing check does not cancel its siblings: we want the full list.
// The shared deadline is what stops everything; a check still in flight
// when it passes reports Timeout.
//
// Rust concepts:
// - tokio::spawn: run each check as an independent task on the runtime
// - FuturesUnordered: yields task results in completion order
// - Drop: a task handle that aborts its task if it is dropped early
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt}; // StreamExt gives us .next()
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use url::Url;

use crate::error::FailureKind;

use super::fetch::Fetcher;
use super::report::Failure;

/// Runs the per-URL checks for one validation run.
#[derive(Debug, Clone)]
pub struct ConcurrentChecker {
    fetcher: Fetcher,
}

// A spawned check plus the URL it is checking
//
// If the owner goes away before the task finishes (for example because the
// caller's future was cancelled), the task is aborted instead of detached.
struct CheckTask {
    url: Url,
    handle: JoinHandle<Result<(), FailureKind>>,
}

impl Drop for CheckTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl ConcurrentChecker {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    // Checks every URL concurrently and returns the ones that failed
    //
    // Parameters:
    //   urls: resolved media URLs (duplicates are checked once per entry)
    //   deadline: shared by every check
    //
    // Returns: failures in the order they were discovered
    pub async fn check_all(&self, urls: Vec<Url>, deadline: Instant) -> Vec<Failure> {
        let mut pending: FuturesUnordered<_> = urls
            .into_iter()
            .map(|url| {
                let task = self.spawn_check(url, deadline);
                async move {
                    let mut task = task;
                    let joined = (&mut task.handle).await;
                    (task.url.clone(), joined)
                }
            })
            .collect();

        let mut failures = Vec::new();

        while let Some((url, joined)) = pending.next().await {
            let result = match joined {
                Ok(result) => result,
                Err(e) => Err(FailureKind::Aborted(e.to_string())),
            };

            match result {
                Ok(()) => debug!(url = %url, "media OK"),
                Err(error) => {
                    debug!(url = %url, error = %error, "media check failed");
                    failures.push(Failure { url, error });
                }
            }
        }

        failures
    }

    fn spawn_check(&self, url: Url, deadline: Instant) -> CheckTask {
        let fetcher = self.fetcher.clone();
        let task_url = url.clone();
        let handle = tokio::spawn(async move { check_media(&fetcher, &task_url, deadline).await });
        CheckTask { url, handle }
    }
}

// Checks one media URL
//
// Passes only on status 200. Everything else (other status, network error,
// deadline) becomes the reason for a failure.
async fn check_media(fetcher: &Fetcher, url: &Url, deadline: Instant) -> Result<(), FailureKind> {
    info!(url = %url, "checking media");

    let outcome = fetcher.fetch(url, deadline).await?;

    if outcome.is_success() {
        Ok(())
    } else {
        Err(FailureKind::BadStatus(outcome.status))
    }
}
