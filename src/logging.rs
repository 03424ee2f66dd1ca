//! Logging setup on top of `tracing-subscriber`.
//!
//! `RUST_LOG` wins when set. Otherwise only warnings are shown, or this
//! crate's debug events with `--verbose`. Output goes to stderr so `--json`
//! output on stdout stays machine-readable.

use tracing_subscriber::{fmt, EnvFilter};

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,dfs_lineup=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert!(default_directive(true).contains("dfs_lineup=debug"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
