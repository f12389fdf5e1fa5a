//! Demo chat server binary.
//! Run with: cargo run --bin clonechat-server

use std::process::ExitCode;

use clonechat::start_clonechat;

fn main() -> ExitCode {
    start_clonechat::run_server()
}
