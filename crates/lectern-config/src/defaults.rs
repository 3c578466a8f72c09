//! Built-in configuration defaults.

use crate::logging::LogFormat;

/// Log filter applied when `LECTERN_LOG_FILTER` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned copy of the default filter, for callers that need a `String`.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Log format applied when `LECTERN_LOG_FORMAT` is unset.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
