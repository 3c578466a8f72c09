//! Ordered in-memory slide registry.
//!
//! Slides keep their insertion order for the lifetime of the process, so a
//! listing always reflects the order decks were authored in. Identifiers
//! are minted by the registry and never recycled.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A slide held by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    /// Registry-assigned identifier, unique for the process lifetime.
    pub id: String,
    /// Renderer the slide is displayed with.
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form properties passed through to the renderer.
    pub props: Value,
}

/// Caller-supplied fields for a new slide.
///
/// The draft deliberately has no identifier member: identifiers are minted
/// by the registry, and any `id` sent by the caller is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SlideDraft {
    /// Renderer for the new slide, empty when unspecified.
    #[serde(rename = "type")]
    pub kind: String,
    /// Initial properties, an empty object when unspecified.
    pub props: Value,
}

impl Default for SlideDraft {
    fn default() -> Self {
        Self {
            kind: String::new(),
            props: empty_props(),
        }
    }
}

/// Partial update applied to an existing slide.
///
/// Absent members leave the stored value untouched. `props` replaces the
/// stored object wholesale rather than merging key by key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SlidePatch {
    /// Replacement renderer, when present.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Replacement properties, when present.
    pub props: Option<Value>,
}

/// Registry of slides in authoring order.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideRegistry {
    slides: Vec<SlideDescriptor>,
}

impl SlideRegistry {
    /// Creates a registry with no slides.
    #[must_use]
    pub const fn empty() -> Self {
        Self { slides: Vec::new() }
    }

    /// Creates a registry seeded with the opening deck.
    #[must_use]
    pub fn with_default_deck() -> Self {
        Self {
            slides: vec![SlideDescriptor {
                id: "adapter-hub-3d".to_owned(),
                kind: "adapterHub3D".to_owned(),
                props: empty_props(),
            }],
        }
    }

    /// Slides in authoring order.
    #[must_use]
    pub fn slides(&self) -> &[SlideDescriptor] {
        &self.slides
    }

    /// Appends a slide built from the draft and returns it.
    ///
    /// The returned descriptor carries the freshly minted identifier.
    pub fn create(&mut self, draft: SlideDraft) -> SlideDescriptor {
        let slide = SlideDescriptor {
            id: mint_slide_id(),
            kind: draft.kind,
            props: draft.props,
        };
        self.slides.push(slide.clone());
        slide
    }

    /// Patches the slide with the given identifier in place.
    ///
    /// Returns the updated descriptor, or `None` when no slide carries the
    /// identifier. The registry is left untouched on a miss.
    pub fn update(&mut self, id: &str, patch: SlidePatch) -> Option<SlideDescriptor> {
        let slide = self.slides.iter_mut().find(|slide| slide.id == id)?;
        if let Some(kind) = patch.kind {
            slide.kind = kind;
        }
        if let Some(props) = patch.props {
            slide.props = props;
        }
        Some(slide.clone())
    }
}

impl Default for SlideRegistry {
    fn default() -> Self {
        Self::with_default_deck()
    }
}

fn mint_slide_id() -> String {
    Uuid::new_v4().to_string()
}

fn empty_props() -> Value {
    Value::Object(Map::new())
}
