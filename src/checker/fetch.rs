// src/checker/fetch.rs
// =============================================================================
// This module performs single HTTP GET requests under a deadline.
//
// Key functionality:
// - One GET per call, no retries, no custom headers
// - The whole exchange (headers AND body) must finish before the deadline
// - When the deadline passes, the in-flight request is dropped, which closes
//   the connection; the caller gets Timeout, never a partial body
// - Any status code counts as a response; deciding what "success" means is
//   the caller's job
//
// Rust concepts:
// - tokio::time::timeout_at: race a future against an Instant
// - Dropping a future cancels it (this is how the request gets aborted)
// - Cheap clones: reqwest::Client is a handle around a shared pool
// =============================================================================

use reqwest::Client;
use tokio::time::Instant;
use url::Url;

use crate::error::{CheckError, FetchError};

/// A response that arrived before the deadline.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchOutcome {
    // Only an exact 200 counts, not the whole 2xx class
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Issues GET requests through one shared HTTP client.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    // Builds a client with reqwest's defaults (including its redirect
    // policy). There is no client-level timeout: every call carries its own
    // deadline instead.
    pub fn new() -> Result<Self, CheckError> {
        let client = Client::builder()
            .build()
            .map_err(|e| CheckError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    // Wraps an already configured client
    #[cfg(test)]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, url: &Url, deadline: Instant) -> Result<FetchOutcome, FetchError> {
        match tokio::time::timeout_at(deadline, self.get(url)).await {
            Ok(result) => result,
            // The GET future was dropped here, taking its connection with it
            Err(_elapsed) => Err(FetchError::Timeout),
        }
    }

    async fn get(&self, url: &Url) -> Result<FetchOutcome, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status().as_u16();
        // The body is always read in full, media included: a response only
        // counts once it has completely arrived within the deadline.
        let body = response.bytes().await.map_err(categorize_error)?;

        Ok(FetchOutcome {
            status,
            body: body.to_vec(),
        })
    }
}

// Turns a reqwest error into a short, readable reason
//
// reqwest errors can happen for many reasons:
// - DNS resolution failure
// - Connection refused
// - SSL certificate issues
// - Too many redirects
// - The connection dropping while the body is streamed
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        return FetchError::Timeout;
    }

    let error_string = error.to_string();

    let detail = if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", source_chain(&error))
    } else if error.is_body() {
        format!("failed to read response body: {}", source_chain(&error))
    } else {
        error_string
    };

    FetchError::Network(detail)
}

// reqwest's top-level message is often just "error sending request";
// the useful part ("Connection refused", "dns error", ...) is in the sources
fn source_chain(error: &reqwest::Error) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = std::error::Error::source(error);
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = std::error::Error::source(inner);
    }
    parts.join(": ")
}
