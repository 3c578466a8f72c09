//! Design token service for the Lectern presentation runtime.
//!
//! The service holds a palette of named design tokens in memory and answers
//! two methods over the JSONL protocol:
//!
//! * `design.tokens.get` returns the current token mapping.
//! * `design.tokens.apply` acknowledges a patch by echoing it back without
//!   persisting it.
//!
//! The binary entrypoint wires the service to standard input and output via
//! [`lectern_service::run`].

pub mod service;
pub mod store;

pub use service::{ApplyReceipt, TokenMethod, TokenService};
pub use store::TokenStore;
