//! Logging setup

use modget_types::LogLevel;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `--log-level` value, falling back to INFO for unknown names
pub fn resolve_level(raw: &str) -> (LogLevel, bool) {
    match raw.parse::<LogLevel>() {
        Ok(level) => (level, true),
        Err(_) => (LogLevel::default(), false),
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `--log-level`.
pub fn init_logging(raw_level: &str) {
    let (level, recognised) = resolve_level(raw_level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();

    if !recognised {
        tracing::warn!("Unknown log level {:?}, using {}", raw_level, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level("debug"), (LogLevel::Debug, true));
        assert_eq!(resolve_level("WARNING"), (LogLevel::Warning, true));
        assert_eq!(resolve_level("loud"), (LogLevel::Info, false));
    }
}
