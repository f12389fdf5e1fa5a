//! Binary entrypoint for the terminal chat client.

use std::process::ExitCode;

use clonechat::start_clonechat;

/// Start an interactive chat session in the terminal.
fn main() -> ExitCode {
    start_clonechat::run_client()
}
