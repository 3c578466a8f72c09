//! Binary entrypoint for the slide registry service.
//!
//! Locks standard input and output for the lifetime of the process and
//! delegates to [`lectern_service::run`], which installs telemetry and
//! serves JSONL requests until the input stream closes.

use std::io::{self, Write};
use std::process::ExitCode;

use lectern_slides::SlideService;

fn main() -> ExitCode {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut service = SlideService::with_default_deck();
    match lectern_service::run(stdin, stdout, &mut service) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            writeln!(io::stderr().lock(), "lectern-slides: {error}").ok();
            ExitCode::FAILURE
        }
    }
}
