//! Runtime configuration for the lectern service binaries.
//!
//! The services take no command-line flags; the only runtime knobs are the
//! telemetry filter and output format, resolved from environment variables
//! with built-in defaults. Resolution goes through an injectable lookup so
//! tests can exercise every path without mutating the process environment.

use std::env;
use std::ffi::OsString;

use thiserror::Error;

pub mod defaults;
pub mod logging;

pub use logging::{LogFormat, LogFormatParseError};

/// Environment variable naming the log filter expression.
pub const LOG_FILTER_ENV: &str = "LECTERN_LOG_FILTER";

/// Environment variable naming the log output format.
pub const LOG_FORMAT_ENV: &str = "LECTERN_LOG_FORMAT";

/// Errors produced while resolving configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that is not valid Unicode.
    #[error("environment variable {key} is not valid unicode")]
    NotUnicode {
        /// Name of the offending variable.
        key: &'static str,
    },
    /// The log format variable did not name a known format.
    #[error("unrecognised log format {value:?}")]
    UnknownLogFormat {
        /// The rejected value.
        value: String,
        /// Parse failure reported by the format parser.
        #[source]
        source: LogFormatParseError,
    },
}

impl ConfigError {
    const fn not_unicode(key: &'static str) -> Self {
        Self::NotUnicode { key }
    }

    const fn unknown_log_format(value: String, source: LogFormatParseError) -> Self {
        Self::UnknownLogFormat { value, source }
    }
}

/// Runtime configuration shared by the service binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    log_filter: String,
    log_format: LogFormat,
}

impl Config {
    /// Builds a configuration from explicit values.
    #[must_use]
    pub fn new(log_filter: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            log_filter: log_filter.into(),
            log_format,
        }
    }

    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds non-Unicode data or an
    /// unrecognised log format.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Resolves configuration through the supplied variable lookup.
    ///
    /// Absent variables fall back to the defaults in [`defaults`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds non-Unicode data or an
    /// unrecognised log format.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let log_filter = read_var(&lookup, LOG_FILTER_ENV)?
            .unwrap_or_else(defaults::default_log_filter_string);
        let log_format = match read_var(&lookup, LOG_FORMAT_ENV)? {
            Some(value) => value
                .parse::<LogFormat>()
                .map_err(|source| ConfigError::unknown_log_format(value, source))?,
            None => defaults::default_log_format(),
        };
        Ok(Self {
            log_filter,
            log_format,
        })
    }

    /// Filter expression handed to the telemetry subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for telemetry events.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
        }
    }
}

fn read_var<F>(lookup: &F, key: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    match lookup(key) {
        Some(value) => value
            .into_string()
            .map(Some)
            .map_err(|_| ConfigError::not_unicode(key)),
        None => Ok(None),
    }
}
