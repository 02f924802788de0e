// * Telemetry - structured logging
// * Installs the global tracing subscriber; RUST_LOG always wins over the level passed in.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Initializes JSON tracing with a custom log level
///
/// # Example
/// ```ignore
/// use partner_scout::ops::telemetry;
///
/// telemetry::init_tracing_with_level("info");
/// tracing::info!(page = 3, "Fetching listing page");
/// ```
pub fn init_tracing_with_level(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().json().with_target(false))
        .init();
}

/// Initializes tracing with pretty formatting (for development)
pub fn init_tracing_pretty_with_level(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().pretty())
        .init();
}

/// Picks the formatter from the CLI's log format
pub fn init_tracing_for(format: LogFormat, level: &str) {
    match format {
        LogFormat::Json => init_tracing_with_level(level),
        LogFormat::Pretty => init_tracing_pretty_with_level(level),
    }
}

// * Default filter: the given level for this crate, warnings for dependencies
fn default_directive(level: &str) -> String {
    format!("warn,partner_scout={level}")
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_scopes_crate() {
        assert_eq!(default_directive("debug"), "warn,partner_scout=debug");
    }

    #[test]
    fn test_default_directive_parses() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(EnvFilter::try_new(default_directive(level)).is_ok());
        }
    }
}
