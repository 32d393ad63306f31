//! Logging setup for the Prism CLI.
//!
//! Diagnostics go to stderr via `tracing-subscriber`, leaving stdout free
//! for command output so `prism config show` and friends stay pipeable.
//! The default filter comes from the `[logging]` section of the config
//! file; a `RUST_LOG` environment variable still wins when set.

use prism_core::config::LoggingConfig;
use prism_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `level` is the filter directive used when `RUST_LOG` is unset.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json_format {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Initialize from the `[logging]` config section, with the CLI flags
/// layered on top.
pub fn init_from_config(config: &Config, verbose: bool, json_logs: bool) {
    init(
        resolve_level(&config.logging, verbose),
        json_logs || config.logging.format == "json",
    );
}

/// The configured level verbatim; `--verbose` raises it to debug but never
/// lowers a level that is already more detailed.
fn resolve_level(logging: &LoggingConfig, verbose: bool) -> &str {
    if verbose && logging.level != "trace" {
        "debug"
    } else {
        &logging.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: "pretty".to_string(),
        }
    }

    #[test]
    fn configured_level_is_used_directly() {
        assert_eq!(resolve_level(&logging("warn"), false), "warn");
        assert_eq!(resolve_level(&logging("info"), false), "info");
    }

    #[test]
    fn verbose_raises_the_level() {
        assert_eq!(resolve_level(&logging("info"), true), "debug");
        assert_eq!(resolve_level(&logging("warn"), true), "debug");
    }

    #[test]
    fn verbose_never_lowers_trace() {
        assert_eq!(resolve_level(&logging("trace"), true), "trace");
    }
}
