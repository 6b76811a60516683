//! Stderr logging shared by the binaries

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map a repeated `-v` count to a log level
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Initialize the global subscriber.
///
/// The `-v` level is only the default: directives in `RUST_LOG` take
/// precedence. Output goes to stderr so stdout carries only results.
pub fn init(verbose: u8) {
    let filter = filter_for(verbose, std::env::var("RUST_LOG").ok().as_deref());

    // A subscriber may already be installed when called from tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .try_init();
}

/// Build the filter from `-v` and an optional `RUST_LOG` value
fn filter_for(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .parse_lossy(rust_log.unwrap_or_default())
}
