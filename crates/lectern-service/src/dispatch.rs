//! Dispatch seam between the serve loop and a concrete service.
//!
//! A service implements [`Dispatcher`] over its own state; the serve loop
//! drives it one request at a time. Routing failures stay first-class
//! values: every variant of [`DispatchError`] becomes the `message` of an
//! error response, so the wording here is part of the wire contract.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Routes decoded requests to service handlers.
///
/// Implementations own the service state. The serve loop handles one
/// request to completion before reading the next line, so handlers never
/// observe concurrent access.
pub trait Dispatcher {
    /// Stable service identifier used in telemetry events.
    fn service_name(&self) -> &'static str;

    /// Handles one request, mutating service state as needed.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] for failures that are answered on the
    /// wire; the loop continues with the next request afterwards.
    fn dispatch(&mut self, method: &str, params: Option<Value>) -> Result<Value, DispatchError>;
}

/// Errors surfaced while routing and handling a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Method name does not match any handler.
    #[error("unknown method")]
    UnknownMethod,

    /// Parameters were present but did not fit the handler's input type.
    #[error("invalid params: {message}")]
    InvalidParams {
        /// Deserialiser description of the mismatch.
        message: String,
        /// Underlying deserialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// Handler state could not be represented as a result value.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl DispatchError {
    /// Creates an invalid params error from a deserialisation failure.
    #[must_use]
    pub fn invalid_params(source: serde_json::Error) -> Self {
        Self::InvalidParams {
            message: source.to_string(),
            source,
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Deserialises optional request params into a handler's input type.
///
/// Absent params fall back to the type's defaults, keeping handlers lenient
/// about omitted members.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidParams`] when present params do not fit
/// the target type.
pub fn decode_params<T>(params: Option<Value>) -> Result<T, DispatchError>
where
    T: DeserializeOwned + Default,
{
    match params {
        Some(value) => serde_json::from_value(value).map_err(DispatchError::invalid_params),
        None => Ok(T::default()),
    }
}

/// Serialises a handler result into the response payload.
///
/// # Errors
///
/// Returns [`DispatchError::Internal`] when the value cannot be represented
/// as JSON.
pub fn result_value<T: Serialize>(value: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(value).map_err(|source| DispatchError::internal(source.to_string()))
}
