//! Tracing subscriber setup for the command line.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Picks the default filter directive from verbosity flags.
///
/// `verbose` wins over `quiet`; neither gives `info`.
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    }
}

/// Installs the global tracing subscriber writing to stderr.
///
/// `RUST_LOG`, when set, overrides the level chosen by the flags.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool, quiet: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));

    fmt()
        .compact()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
