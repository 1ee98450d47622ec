//! Logging bootstrap for the Verve launchers.
//!
//! The launchers are short-lived and run interactively, so logging stays minimal:
//! a single `tracing` fmt subscriber writing to `stderr`, filtered by `RUST_LOG`.

use crate::error::{CoreError, LoggingError};

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Builds the log filter from an optional `RUST_LOG`-style directive string.
///
/// `None` or an empty string yields a filter at `default_level`.
pub fn build_filter(directives: Option<&str>, default_level: Level) -> Result<EnvFilter, LoggingError> {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => {
            EnvFilter::try_new(directives).map_err(|e| LoggingError::FilterError(format!("{directives}: {e}")))
        }
        None => Ok(EnvFilter::new(default_level.to_string())),
    }
}

/// Installs the global stderr subscriber.
///
/// `directives` follows `RUST_LOG` syntax; `None` selects `default_level`.
/// Fails on an unparsable filter or when a global subscriber is already set.
pub fn try_init_logging(directives: Option<&str>, default_level: Level) -> Result<(), CoreError> {
    let filter = build_filter(directives, default_level)?;

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailure(e.to_string()))?;
    Ok(())
}

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// Messages are filtered by `RUST_LOG`, falling back to `default_level` when it is
/// unset or invalid. A subscriber that is already installed is left in place.
pub fn init_minimal_logging(default_level: Level) {
    let directives = std::env::var("RUST_LOG").ok();
    match try_init_logging(directives.as_deref(), default_level) {
        Err(CoreError::Logging(LoggingError::FilterError(reason))) => {
            if try_init_logging(None, default_level).is_ok() {
                tracing::warn!(%reason, "Ignoring invalid RUST_LOG");
            }
        }
        Ok(()) | Err(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_build_filter_defaults_when_unset() {
        let filter = build_filter(None, Level::WARN).expect("default filter");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_build_filter_defaults_when_blank() {
        let filter = build_filter(Some("   "), Level::INFO).expect("default filter");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_build_filter_uses_directives() {
        let filter = build_filter(Some("verve_system=debug"), Level::WARN).expect("parsed filter");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        let err = build_filter(Some("verve_system=notalevel"), Level::WARN).unwrap_err();
        assert!(matches!(err, LoggingError::FilterError(_)));
    }

    #[test]
    fn test_try_init_logging_reports_invalid_filter() {
        let err = try_init_logging(Some("verve_core=notalevel"), Level::WARN).unwrap_err();
        assert!(matches!(err, CoreError::Logging(LoggingError::FilterError(_))));
    }

    #[test]
    fn test_try_init_logging_rejects_second_subscriber() {
        // The first call may lose the race against another test; the second never wins.
        let _ = try_init_logging(None, Level::WARN);
        let err = try_init_logging(None, Level::WARN).unwrap_err();
        assert!(matches!(err, CoreError::Logging(LoggingError::InitializationFailure(_))));
    }

    #[test]
    fn test_init_minimal_logging_is_idempotent() {
        init_minimal_logging(Level::WARN);
        init_minimal_logging(Level::DEBUG);
        tracing::debug!("logging initialized twice without panicking");
    }
}
