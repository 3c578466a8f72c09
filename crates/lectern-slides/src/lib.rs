//! Slide registry service for the Lectern presentation runtime.
//!
//! The service holds the deck in memory, in authoring order, and answers
//! three methods over the JSONL protocol:
//!
//! * `slides.list` returns every slide in order.
//! * `slides.create` appends a slide built from a draft and returns it with
//!   a freshly minted identifier.
//! * `slides.update` patches an existing slide in place, answering `null`
//!   when no slide carries the requested identifier.
//!
//! The binary entrypoint wires the service to standard input and output via
//! [`lectern_service::run`].

pub mod registry;
pub mod service;

pub use registry::{SlideDescriptor, SlideDraft, SlidePatch, SlideRegistry};
pub use service::{SlideMethod, SlideService, UpdateParams};
