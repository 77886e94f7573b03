// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Run one validation of the page's media
// 4. Log (and optionally print) the report
// 5. Exit with proper code (0 = all media OK, 1 = broken media, 2 = error)
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching on the outcome of the run
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - extraction, resolution, fetching, checking
mod cli; // src/cli.rs - command-line parsing
mod error; // src/error.rs - error types
mod logging; // src/logging.rs - tracing subscriber setup
mod validate; // src/validate/ - the end-to-end run

#[cfg(test)]
mod testutil;

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use tracing::{error, info};

use anyhow::Result;

use checker::{Failure, Fetcher, Report};
use validate::ValidationRun;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.log_level, cli.log_format) {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "NOT OK");
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every media URL returned 200
//   Ok(1) = at least one media URL failed
//   Err = fatal error (bad URL, page unreachable, mixed content, ...)
async fn run(cli: &Cli) -> Result<i32> {
    let fetcher = Fetcher::new()?;
    let report = ValidationRun::new(cli.url.as_str(), cli.budget(), fetcher)
        .execute()
        .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(log_report(&report))
}

// Logs the verdict and returns the matching exit code
fn log_report(report: &Report) -> i32 {
    if report.is_ok() {
        info!(page = %report.page, checked = report.checked, "OK");
        return 0;
    }

    for Failure { url, error } in &report.failures {
        error!(url = %url, error = %error, "error fetching media");
    }
    error!(
        page = %report.page,
        checked = report.checked,
        failures = report.failures.len(),
        "NOT OK"
    );
    1
}
