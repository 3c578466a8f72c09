//! Request deserialisation for the serve loop.
//!
//! Parses one JSONL line into a typed [`Request`] envelope. The envelope is
//! deliberately loose: only well-formed JSON is required to get past this
//! layer, so that a line with a missing method still routes to the
//! unknown-method answer instead of failing the parse, and a present-but-null
//! correlation id stays distinguishable from an absent one.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::DecodeError;

/// Parsed request envelope from a single input line.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Request {
    /// Correlation id echoed verbatim in the response. `None` when the
    /// member was absent from the line; a JSON `null` id is present and
    /// echoes as `null`.
    #[serde(default, deserialize_with = "present_value")]
    pub id: Option<Value>,
    /// Method name selecting the handler. `None` when the line parsed but
    /// carried no method member.
    #[serde(default)]
    pub method: Option<String>,
    /// Method parameters forwarded to the handler untouched.
    #[serde(default)]
    pub params: Option<Value>,
}

impl Request {
    /// Parses a JSONL line into a request envelope.
    ///
    /// Trailing whitespace (including the newline delimiter) is trimmed
    /// before parsing. Lines that parse as JSON but do not fit the envelope
    /// keep whatever `id` member the line carried, so the error response can
    /// still correlate.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the line is empty, is not valid JSON, or
    /// does not match the envelope schema.
    pub fn parse(line: &[u8]) -> Result<Self, DecodeError> {
        let trimmed = trim_trailing_whitespace(line);
        if trimmed.is_empty() {
            return Err(DecodeError::EmptyLine);
        }

        let value: Value =
            serde_json::from_slice(trimmed).map_err(DecodeError::from_json_error)?;
        let id = value.get("id").cloned();
        serde_json::from_value(value).map_err(|source| DecodeError::invalid_envelope(id, source))
    }
}

/// Maps a present member to `Some`, keeping an explicit `null` distinct from
/// an absent member.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Trims trailing ASCII whitespace from a byte slice.
fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    bytes.get(..end).unwrap_or_default()
}
