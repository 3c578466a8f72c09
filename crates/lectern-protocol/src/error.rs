//! Error types for wire decoding and encoding failures.
//!
//! Decode failures are answerable: the serve loop turns each one into a
//! single error response line and carries on with the next request. Encode
//! failures are not answerable and terminate the loop instead.

use std::io;

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced while decoding one request line.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Request line was empty or contained only whitespace.
    #[error("empty request line")]
    EmptyLine,

    /// Request line could not be parsed as JSON.
    #[error("malformed JSONL: {message}")]
    MalformedJsonl {
        /// Parser description of the failure.
        message: String,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Request line parsed as JSON but did not fit the request envelope.
    #[error("invalid request envelope: {message}")]
    InvalidEnvelope {
        /// Parser description of the mismatch.
        message: String,
        /// Correlation id salvaged from the parsed line, if any.
        id: Option<Value>,
        /// Underlying deserialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// Request line exceeded the maximum allowed size.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Observed size of the rejected line in bytes.
        size: usize,
        /// Configured size bound in bytes.
        max_size: usize,
    },
}

impl DecodeError {
    /// Creates a malformed JSONL error from a parse failure.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedJsonl {
            message: source.to_string(),
            source,
        }
    }

    /// Creates an envelope error carrying any salvaged correlation id.
    #[must_use]
    pub fn invalid_envelope(id: Option<Value>, source: serde_json::Error) -> Self {
        Self::InvalidEnvelope {
            message: source.to_string(),
            id,
            source,
        }
    }

    /// Creates a request too large error.
    #[must_use]
    pub const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }

    /// Correlation id recovered from the rejected line, if any.
    #[must_use]
    pub const fn request_id(&self) -> Option<&Value> {
        match self {
            Self::InvalidEnvelope { id, .. } => id.as_ref(),
            Self::EmptyLine | Self::MalformedJsonl { .. } | Self::RequestTooLarge { .. } => None,
        }
    }
}

/// Errors surfaced while serialising and writing a response line.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Response serialisation failed.
    #[error("failed to serialise response: {0}")]
    Serialise(#[from] serde_json::Error),

    /// Writing to the output stream failed.
    #[error("failed to write response: {0}")]
    Io(#[from] io::Error),
}
