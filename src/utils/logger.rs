//! Logging setup using tracing.
//!
//! The level comes from `RUST_LOG` when set, otherwise from the config/CLI
//! level. A one-shot run logs to stderr only, keeping stdout for the
//! completion line (and `--json` output).

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber with the given fallback level.
pub fn init(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}
