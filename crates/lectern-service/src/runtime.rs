//! Shared startup path for the service binaries.
//!
//! Both binaries follow the same staged bootstrap: resolve configuration
//! from the environment, initialise telemetry, then hand the streams to the
//! serve loop. Each stage failure is typed so the binary can report it and
//! exit non-zero.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::error;

use lectern_config::{Config, ConfigError};

use crate::dispatch::Dispatcher;
use crate::serve::{ServeError, serve};
use crate::telemetry::{self, TelemetryError};

/// Tracing target for runtime events.
pub(crate) const RUNTIME_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::runtime");

/// Errors surfaced while bootstrapping or running a service.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration could not be resolved from the environment.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Telemetry could not be initialised.
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    /// The serve loop terminated on a transport failure.
    #[error("serve error: {0}")]
    Serve(#[from] ServeError),
}

/// Runs a service over the given streams until the input closes.
///
/// Intended to be called once from a binary's `main` with the locked
/// standard streams. Request-level failures are answered on the wire and
/// never surface here.
///
/// # Errors
///
/// Returns [`RunError`] when configuration resolution, telemetry
/// initialisation, or the transport fails.
pub fn run<R, W, D>(input: R, output: W, dispatcher: &mut D) -> Result<(), RunError>
where
    R: BufRead,
    W: Write,
    D: Dispatcher,
{
    let config = Config::from_env()?;
    telemetry::initialise(&config)?;

    match serve(input, output, dispatcher) {
        Ok(_) => Ok(()),
        Err(source) => {
            error!(
                target: RUNTIME_TARGET,
                service = dispatcher.service_name(),
                %source,
                "service terminated"
            );
            Err(RunError::Serve(source))
        }
    }
}
