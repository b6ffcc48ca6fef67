//! Subscriber setup for the CLI
//!
//! Events go to stderr so generated hints on stdout stay clean.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "warn";

/// Install a global fmt subscriber.
///
/// `level` wins over `RUST_LOG`; with neither set only warnings and errors
/// are shown.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid --log-level `{level}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);
    let subscriber = tracing_subscriber::registry().with(filter).with(layer);

    // Ignore the error if a subscriber is already set
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}
