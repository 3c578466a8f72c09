//! Structured telemetry initialisation for the service binaries.
//!
//! Telemetry always writes to standard error: standard output carries the
//! response stream and must never receive log lines.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use lectern_config::{Config, LogFormat};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber when invoked for the first time.
///
/// Repeated calls are idempotent: the first invocation installs the global
/// subscriber, later ones detect the existing registration and return a
/// fresh [`TelemetryHandle`] without touching global state again.
///
/// # Examples
///
/// ```rust
/// use lectern_config::Config;
/// use lectern_service::telemetry;
///
/// # fn main() -> Result<(), lectern_service::telemetry::TelemetryError> {
/// let config = Config::default();
/// let first = telemetry::initialise(&config)?;
/// let second = telemetry::initialise(&config)?;
///
/// drop(first);
/// drop(second);
/// # Ok(())
/// # }
/// ```
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config))
        .map(|_| TelemetryHandle)
}

fn build_filter(config: &Config) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;

    let base = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        // Colour only when standard error is a terminal; parent processes
        // capture the stream and must not see escape codes.
        .with_ansi(io::stderr().is_terminal())
        // Timestamps let operators correlate service activity with the
        // parent process's records.
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let installed = match config.log_format() {
        LogFormat::Json => {
            tracing::subscriber::set_global_default(base.json().flatten_event(true).finish())
        }
        LogFormat::Compact => tracing::subscriber::set_global_default(base.compact().finish()),
    };
    installed.map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use lectern_config::{Config, LogFormat};

    use super::{TelemetryError, build_filter, initialise};

    #[test]
    fn valid_filter_expression_is_accepted() {
        let config = Config::new("info,lectern_service=debug", LogFormat::Json);
        build_filter(&config).expect("filter should parse");
    }

    #[test]
    fn invalid_filter_expression_is_rejected() {
        let config = Config::new("foo=bar=baz", LogFormat::Compact);
        let error = build_filter(&config).expect_err("filter should be rejected");
        assert!(matches!(error, TelemetryError::Filter(_)));
        assert!(error.to_string().starts_with("invalid log filter"));
    }

    #[test]
    fn repeated_initialisation_is_idempotent() {
        let config = Config::default();
        initialise(&config).expect("first initialisation");
        initialise(&config).expect("second initialisation");
    }
}
