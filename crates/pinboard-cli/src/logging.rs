//! Logging init: human-readable progress lines on stderr.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset; `-v` switches the crawler to debug.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,pinboard_core=debug,pinboard=debug"
    } else {
        "info,pinboard_core=info"
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
