//! Tracing bootstrap for the CLI.
//!
//! Reports go to stdout, so every log line lands on stderr. The level and
//! format come from the `[logging]` config section; `--verbose` and
//! `--json-logs` win over the file, and `RUST_LOG` wins over everything.

use thumbmill_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wire up the global subscriber. Call once, before any command runs.
pub fn init(config: &Config, verbose: bool, json_logs: bool) {
    let level = resolved_level(&config.logging.level, verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr = fmt::layer().with_writer(std::io::stderr);
    if json_logs || config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr.with_target(false).with_ansi(true))
            .init();
    }
}

/// `--verbose` forces debug; otherwise take the configured level, falling
/// back to info for anything unrecognized.
fn resolved_level(configured: &str, verbose: bool) -> &str {
    if verbose {
        return "debug";
    }
    match configured {
        "trace" | "debug" | "warn" | "error" => configured,
        _ => "info",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_wins_over_configured_level() {
        assert_eq!(resolved_level("error", true), "debug");
    }

    #[test]
    fn configured_level_used_when_not_verbose() {
        assert_eq!(resolved_level("warn", false), "warn");
        assert_eq!(resolved_level("trace", false), "trace");
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(resolved_level("loud", false), "info");
        assert_eq!(resolved_level("", false), "info");
    }
}
