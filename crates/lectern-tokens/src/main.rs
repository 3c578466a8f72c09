//! Binary entrypoint for the design token service.
//!
//! Locks standard input and output for the lifetime of the process and
//! delegates to [`lectern_service::run`], which installs telemetry and
//! serves JSONL requests until the input stream closes.

use std::io::{self, Write};
use std::process::ExitCode;

use lectern_tokens::TokenService;

fn main() -> ExitCode {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut service = TokenService::with_default_palette();
    match lectern_service::run(stdin, stdout, &mut service) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            writeln!(io::stderr().lock(), "lectern-tokens: {error}").ok();
            ExitCode::FAILURE
        }
    }
}
