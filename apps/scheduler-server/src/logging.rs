use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Map `-v` occurrences onto the configured base level.
fn effective_level(configured: &str, verbose: u8) -> &str {
    match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logging(config: &LoggingConfig, verbose: u8) {
    let level = effective_level(&config.level, verbose).to_string();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_flags_override_configured_level() {
        assert_eq!(effective_level("warn", 0), "warn");
        assert_eq!(effective_level("warn", 1), "info");
        assert_eq!(effective_level("warn", 2), "debug");
        assert_eq!(effective_level("warn", 3), "trace");
        assert_eq!(effective_level("warn", 9), "trace");
    }
}
