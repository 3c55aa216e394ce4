use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}' from {origin}")]
    Filter {
        value: String,
        origin: &'static str,
        #[source]
        source: ParseError,
    },
    #[error("could not install the report logger: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Picks the log filter for a report run. A non-empty `RUST_LOG` wins over the configured
/// level, and a malformed value from either place is an error rather than silently dropped.
pub fn log_filter(rust_log: Option<&str>, log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let (value, origin) = match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => (directives, "RUST_LOG"),
        _ => (log_level.trim(), "APP_LOG_LEVEL"),
    };

    EnvFilter::try_new(value).map_err(|source| TelemetryError::Filter {
        value: value.to_string(),
        origin,
        source,
    })
}

/// Installs the global subscriber. Output goes to stderr so stdout carries only the report.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(rust_log.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn rust_log_overrides_configured_level() {
        let filter = log_filter(Some("tceq_monitoring=debug"), "warn").expect("filter");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = log_filter(Some("  "), "warn").expect("filter");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn malformed_level_names_its_origin() {
        let error = log_filter(None, "tceq_monitoring=loud").expect_err("bad level");
        assert!(matches!(
            error,
            TelemetryError::Filter {
                origin: "APP_LOG_LEVEL",
                ..
            }
        ));
        assert!(error.to_string().contains("tceq_monitoring=loud"));
    }
}
