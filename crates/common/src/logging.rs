//! Logging and tracing initialization.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Level used when the configured filter does not parse.
pub const DEFAULT_LEVEL: &str = "info";

/// Level forced by `--verbose`.
pub const VERBOSE_LEVEL: &str = "debug";

/// Build the filter for a configured level string.
///
/// A malformed level (for example `evtt_core=loud`) falls back to
/// [`DEFAULT_LEVEL`] instead of silencing every event.
pub fn config_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Configuration with the CLI verbosity flag applied.
pub fn effective_config(config: &LoggingConfig, verbose: bool) -> LoggingConfig {
    let mut config = config.clone();
    if verbose {
        config.level = VERBOSE_LEVEL.to_string();
    }
    config
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so that stdout stays usable for `--dry-run` output.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config_filter(&config.level));

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_config_filter_uses_level() {
        assert_eq!(config_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            config_filter("evtt_core=debug").max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_malformed_level_falls_back_to_info() {
        assert_eq!(
            config_filter("evtt_core=loud").max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_verbose_overrides_level_only() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            json: true,
        };

        let quiet = effective_config(&config, false);
        assert_eq!(quiet.level, "warn");

        let verbose = effective_config(&config, true);
        assert_eq!(verbose.level, VERBOSE_LEVEL);
        assert!(verbose.json);
    }
}
