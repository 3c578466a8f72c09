//! In-memory token store seeded with the product palette.

use std::collections::BTreeMap;

use serde_json::Value;

/// Token names mapped to their current values.
///
/// A `BTreeMap` keeps snapshots deterministically ordered, so identical
/// reads serialise identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore {
    tokens: BTreeMap<String, String>,
}

impl TokenStore {
    /// Creates a store holding the given token mapping.
    #[must_use]
    pub const fn new(tokens: BTreeMap<String, String>) -> Self {
        Self { tokens }
    }

    /// Creates a store seeded with the default palette.
    #[must_use]
    pub fn with_default_palette() -> Self {
        let tokens = [
            ("theme", "ryze-pro-metallic"),
            ("accent", "emerald"),
            ("bg", "#000000"),
            ("fg", "#ffffff"),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect();
        Self { tokens }
    }

    /// Current token mapping as a JSON object.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        let members = self
            .tokens
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();
        Value::Object(members)
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::with_default_palette()
    }
}
