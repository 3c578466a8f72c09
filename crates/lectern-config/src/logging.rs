//! Logging output format selection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Output formats for telemetry events.
///
/// Values parse case-insensitively, so `LECTERN_LOG_FORMAT=JSON` and
/// `=json` select the same format.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Newline-delimited JSON events for log aggregation.
    #[default]
    Json,
    /// Terse single-line output for interactive use.
    Compact,
}

/// Error reported when text does not name a [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::LogFormat;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("compact", LogFormat::Compact)]
    #[case("JSON", LogFormat::Json)]
    #[case("Compact", LogFormat::Compact)]
    fn parses_known_formats(#[case] input: &str, #[case] expected: LogFormat) {
        let parsed = input.parse::<LogFormat>().expect("format should parse");
        assert_eq!(parsed, expected);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn displays_in_snake_case() {
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::Compact.to_string(), "compact");
    }
}
