// src/logging.rs
// =============================================================================
// Sets up where log lines go and what they look like.
//
// - Text or newline-delimited JSON, chosen with --log-format
// - Default level from --log-level; RUST_LOG wins when it is set
// - Everything goes to stderr so `--json` output on stdout stays clean
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::{LogFormat, LogLevel};

// Installs the global subscriber; call once at startup
pub fn init_logging(level: LogLevel, format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_tracing().as_str()));

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Text => registry.with(layer).try_init(),
    };

    installed.map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}
