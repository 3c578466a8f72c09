//! Runtime core for lectern's line-delimited services.
//!
//! `lectern-protocol` owns the wire model; this crate owns everything that
//! moves: the [`Dispatcher`] seam a service implements over its state, the
//! synchronous serve loop that answers one request line at a time, telemetry
//! initialisation, and the shared [`run`] entrypoint the binaries call.
//!
//! The loop's contract is deliberately strict: every input line produces
//! exactly one output line, in input order, and no request-level failure
//! ever terminates the process.

pub mod dispatch;
pub mod runtime;
pub mod serve;
pub mod telemetry;

pub use dispatch::{DispatchError, Dispatcher, decode_params, result_value};
pub use runtime::{RunError, run};
pub use serve::{ServeError, serve};
pub use telemetry::{TelemetryError, TelemetryHandle};
