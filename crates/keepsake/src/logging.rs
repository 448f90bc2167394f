//! Logging initialization and configuration.
//!
//! Uses the `tracing` ecosystem for structured logging with support for
//! both human-readable and JSON output formats.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `level` - Default filter when `RUST_LOG` is not set.
/// * `json_format` - If true, outputs structured JSON logs; otherwise pretty-printed.
///
/// Log output goes to stderr; stdout is reserved for results.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` section, with CLI overrides.
pub fn init_from_config(
    config: &keepsake_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) {
    init(
        &effective_level(&config.logging.level, verbose_override),
        json_logs_override || config.logging.format == "json",
    );
}

/// `--verbose` raises the level to debug but never lowers `trace`.
fn effective_level(configured: &str, verbose: bool) -> String {
    match configured {
        "trace" => "trace".to_string(),
        _ if verbose => "debug".to_string(),
        "" => "info".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_level() {
        assert_eq!(effective_level("info", false), "info");
        assert_eq!(effective_level("warn", true), "debug");
        assert_eq!(effective_level("trace", true), "trace");
        assert_eq!(effective_level("", false), "info");
    }
}
