//! Logging setup for the command-line binary.

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Level used when RUST_LOG is unset: warn by default, info for -v, debug for -vv and above.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install a stderr fmt subscriber. RUST_LOG overrides the verbosity flag.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2) // Show target module for -vv and above
        .try_init();

    debug!("[logging] verbosity level {}", verbose);
}
