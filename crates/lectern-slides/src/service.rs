//! Dispatch layer for the slide registry service.

use lectern_service::{DispatchError, Dispatcher, decode_params, result_value};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::registry::{SlideDraft, SlidePatch, SlideRegistry};

const SERVICE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::service");

/// Methods understood by the slide registry service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideMethod {
    /// List every slide in authoring order.
    List,
    /// Append a slide built from a draft.
    Create,
    /// Patch an existing slide.
    Update,
}

impl SlideMethod {
    /// Resolves a wire method name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownMethod`] when the name does not match
    /// a supported method. Matching is case sensitive.
    pub fn parse(name: &str) -> Result<Self, DispatchError> {
        match name {
            "slides.list" => Ok(Self::List),
            "slides.create" => Ok(Self::Create),
            "slides.update" => Ok(Self::Update),
            _ => Err(DispatchError::UnknownMethod),
        }
    }

    /// Wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "slides.list",
            Self::Create => "slides.create",
            Self::Update => "slides.update",
        }
    }
}

/// Parameters accepted by `slides.update`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateParams {
    /// Identifier of the slide to patch.
    pub id: Option<String>,
    /// Members to overwrite on the slide.
    pub patch: SlidePatch,
}

/// Stateful slide registry service.
#[derive(Debug, Clone, Default)]
pub struct SlideService {
    registry: SlideRegistry,
}

impl SlideService {
    /// Creates a service over the given registry.
    #[must_use]
    pub const fn new(registry: SlideRegistry) -> Self {
        Self { registry }
    }

    /// Creates a service seeded with the opening deck.
    #[must_use]
    pub fn with_default_deck() -> Self {
        Self::new(SlideRegistry::with_default_deck())
    }
}

impl Dispatcher for SlideService {
    fn service_name(&self) -> &'static str {
        "slide-registry"
    }

    fn dispatch(
        &mut self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, DispatchError> {
        match SlideMethod::parse(method)? {
            SlideMethod::List => result_value(&self.registry.slides()),
            SlideMethod::Create => {
                let draft: SlideDraft = decode_params(params)?;
                debug!(target: SERVICE_TARGET, kind = %draft.kind, "creating slide");
                let created = self.registry.create(draft);
                result_value(&created)
            }
            SlideMethod::Update => {
                let arguments: UpdateParams = decode_params(params)?;
                let Some(id) = arguments.id else {
                    debug!(target: SERVICE_TARGET, "update carried no identifier");
                    return Ok(Value::Null);
                };
                match self.registry.update(&id, arguments.patch) {
                    Some(updated) => result_value(&updated),
                    None => {
                        debug!(target: SERVICE_TARGET, id = %id, "update missed");
                        Ok(Value::Null)
                    }
                }
            }
        }
    }
}
