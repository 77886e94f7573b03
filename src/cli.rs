// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants (ValueEnum)
// - Derive macros: Automatically generate code for our types
// =============================================================================

use std::time::Duration;

use clap::{Parser, ValueEnum};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "mediacheck",
    version,
    about = "Check that every image, script, stylesheet and other media on a page is reachable",
    long_about = "mediacheck fetches one HTML page, finds every media resource it references \
                  (img, script, link, video, source, track, iframe) and requests them all \
                  concurrently. It exits 0 when everything returned 200 within the time budget."
)]
pub struct Cli {
    /// URL of the page to check (must be absolute, e.g. https://example.com/)
    #[arg(long)]
    pub url: String,

    /// Time budget for the whole run, in milliseconds
    ///
    /// Covers the page fetch and every media check.
    #[arg(long, default_value_t = 3000, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Log level (RUST_LOG overrides this when set)
    #[arg(long, value_enum, default_value_t = LogLevel::Error)]
    pub log_level: LogLevel,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mediacheck", "--url", "https://example.com/"]).unwrap();
        assert_eq!(cli.url, "https://example.com/");
        assert_eq!(cli.budget(), Duration::from_millis(3000));
        assert_eq!(cli.log_level, LogLevel::Error);
        assert_eq!(cli.log_format, LogFormat::Text);
        assert!(!cli.json);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "mediacheck",
            "--url",
            "http://localhost:8080/",
            "--timeout",
            "100",
            "--log-level",
            "info",
            "--log-format",
            "json",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.budget(), Duration::from_millis(100));
        assert_eq!(cli.log_level.as_tracing(), tracing::Level::INFO);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(cli.json);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["mediacheck"]).is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = Cli::try_parse_from(["mediacheck", "--url", "https://x/", "--timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let result =
            Cli::try_parse_from(["mediacheck", "--url", "https://x/", "--log-level", "debug"]);
        assert!(result.is_err());
    }
}
