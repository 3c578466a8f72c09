//! Dispatch layer for the design token service.

use lectern_service::{DispatchError, Dispatcher, result_value};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::store::TokenStore;

const SERVICE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::service");

/// Methods understood by the token service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMethod {
    /// Read the current token mapping.
    Get,
    /// Acknowledge a token patch.
    Apply,
}

impl TokenMethod {
    /// Resolves a wire method name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownMethod`] when the name does not match
    /// a supported method. Matching is case sensitive.
    pub fn parse(name: &str) -> Result<Self, DispatchError> {
        match name {
            "design.tokens.get" => Ok(Self::Get),
            "design.tokens.apply" => Ok(Self::Apply),
            _ => Err(DispatchError::UnknownMethod),
        }
    }

    /// Wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "design.tokens.get",
            Self::Apply => "design.tokens.apply",
        }
    }
}

/// Acknowledgement returned by `design.tokens.apply`.
///
/// The receipt echoes the requested patch without persisting it. Callers
/// hold their own working copy of the palette, so the service only confirms
/// receipt and repeats the payload back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyReceipt {
    /// Always `true` for an acknowledged patch.
    pub ok: bool,
    /// The patch as supplied by the caller, omitted when none was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<Value>,
}

impl ApplyReceipt {
    /// Builds a receipt acknowledging the given patch.
    #[must_use]
    pub const fn acknowledging(patch: Option<Value>) -> Self {
        Self {
            ok: true,
            applied: patch,
        }
    }
}

/// Stateful design token service.
#[derive(Debug, Clone, Default)]
pub struct TokenService {
    store: TokenStore,
}

impl TokenService {
    /// Creates a service over the given store.
    #[must_use]
    pub const fn new(store: TokenStore) -> Self {
        Self { store }
    }

    /// Creates a service seeded with the default palette.
    #[must_use]
    pub fn with_default_palette() -> Self {
        Self::new(TokenStore::with_default_palette())
    }
}

impl Dispatcher for TokenService {
    fn service_name(&self) -> &'static str {
        "design-tokens"
    }

    fn dispatch(
        &mut self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, DispatchError> {
        match TokenMethod::parse(method)? {
            TokenMethod::Get => Ok(self.store.snapshot()),
            TokenMethod::Apply => {
                debug!(
                    target: SERVICE_TARGET,
                    has_patch = params.is_some(),
                    "acknowledging token patch"
                );
                result_value(&ApplyReceipt::acknowledging(params))
            }
        }
    }
}
