//! Tracing setup for the `idb` binary and its tests.
//!
//! A short-lived CLI wants readable stderr at rest and more detail as `-v`
//! is repeated; `--log-file` adds a machine-readable JSON sink for
//! debugging sessions. A `RUST_LOG` value replaces the flag-derived filter
//! entirely.

use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Target prefix for this crate's own events.
const CRATE_TARGET: &str = env!("CARGO_PKG_NAME");

/// Install the global subscriber: a compact stderr layer, plus a JSON file
/// layer when `log_file` is given.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a subscriber is
/// already installed.
pub fn init_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbosity, quiet)));

    // Event targets are only worth the column space once someone asks for
    // more output.
    let stderr_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 0)
        .with_ansi(std::io::stderr().is_terminal());

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging is already initialized")?;

    Ok(())
}

/// Map the `-v` count onto the two layers that log here: this crate first,
/// then rusqlite underneath it at the top tier.
fn filter_directives(verbosity: u8, quiet: bool) -> String {
    if quiet {
        return String::from("error");
    }

    match verbosity {
        0 => format!("{CRATE_TARGET}=info"),
        1 => format!("{CRATE_TARGET}=debug"),
        _ => format!("{CRATE_TARGET}=trace,rusqlite=debug"),
    }
}

/// Capture-friendly logging for tests. Safe to call more than once; only
/// the first subscriber wins.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{CRATE_TARGET}=debug")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_any_verbosity() {
        assert_eq!(filter_directives(3, true), "error");
        assert_eq!(filter_directives(0, true), "error");
    }

    #[test]
    fn repeated_verbosity_widens_crate_then_rusqlite_output() {
        assert_eq!(filter_directives(0, false), "issuedb=info");
        assert_eq!(filter_directives(1, false), "issuedb=debug");
        assert_eq!(filter_directives(2, false), "issuedb=trace,rusqlite=debug");
        assert_eq!(filter_directives(9, false), "issuedb=trace,rusqlite=debug");
    }
}
