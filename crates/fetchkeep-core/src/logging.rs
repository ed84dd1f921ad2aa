//! Logging init: stderr only.
//!
//! An install run must leave nothing behind but the checkout, so there is no
//! log file. `RUST_LOG` raises verbosity (e.g. `RUST_LOG=fetchkeep_core=debug`
//! shows every pipeline stage).

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize structured logging to stderr. Call once, before anything logs.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}
