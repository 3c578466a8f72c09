//! Response serialisation for the serve loop.
//!
//! Every request line is answered by exactly one response line carrying
//! either a result or an error, never both. The [`ResponseWriter`] owns the
//! JSONL framing and flushes each line before the loop reads further input.

use std::io::Write;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::EncodeError;

/// Reply to a single request line.
///
/// The variants make the result/error exclusion structural: a response is
/// one or the other by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    /// Successful outcome carrying the handler's result value.
    Success {
        /// Correlation id echoed from the request; omitted when the request
        /// carried none.
        #[serde(
            default,
            deserialize_with = "present_value",
            skip_serializing_if = "Option::is_none"
        )]
        id: Option<Value>,
        /// Result payload. A JSON `null` is a valid successful result.
        result: Value,
    },
    /// Failed outcome carrying the error report.
    Failure {
        /// Correlation id echoed from the request when one was recovered.
        #[serde(
            default,
            deserialize_with = "present_value",
            skip_serializing_if = "Option::is_none"
        )]
        id: Option<Value>,
        /// Error report for the caller.
        error: ResponseError,
    },
}

/// Error report carried by a failed response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl Response {
    /// Builds a successful response around a result value.
    #[must_use]
    pub const fn success(id: Option<Value>, result: Value) -> Self {
        Self::Success { id, result }
    }

    /// Builds a failed response around an error message.
    #[must_use]
    pub fn failure(id: Option<Value>, message: impl Into<String>) -> Self {
        Self::Failure {
            id,
            error: ResponseError {
                message: message.into(),
            },
        }
    }

    /// Correlation id carried by the response, if any.
    #[must_use]
    pub const fn id(&self) -> Option<&Value> {
        match self {
            Self::Success { id, .. } | Self::Failure { id, .. } => id.as_ref(),
        }
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

/// Writer that frames responses as JSONL.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Creates a response writer wrapping the given output stream.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Serialises one response as a single line and flushes it.
    ///
    /// The flush keeps response `i` fully visible to the caller before
    /// input line `i + 1` is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if serialisation or writing fails.
    pub fn write(&mut self, response: &Response) -> Result<(), EncodeError> {
        serde_json::to_writer(&mut self.writer, response)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
