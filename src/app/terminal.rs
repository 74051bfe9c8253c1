//! Tracing setup for the diagnostic stream.

/// Picks the default log level from `-q` / `-v` counts.
///
/// A single `-v` only turns on attempt lines, so logs start at `info` for
/// `-v`, `debug` for `-vv` and `trace` beyond. `RUST_LOG` overrides all of it.
pub(crate) fn resolve_default_log_level(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber, writing to stderr so stdout stays a clean table.
pub(crate) fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
