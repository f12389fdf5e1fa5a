//! Startup helpers for the chat client and the demo server binaries.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::Level;

use crate::client;
use crate::domain::config::{ClientConfig, ServerConfig};
use crate::server::{self, ServerState};

/// Install the global subscriber. Logs go to stderr so stdout stays the chat.
fn init_tracing(default_level: Level) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();
}

/// Build a multi-threaded runtime, logging on failure.
fn runtime() -> Option<tokio::runtime::Runtime> {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => Some(rt),
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            None
        }
    }
}

/// Run the interactive client (used by the `clonechat` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` when the user leaves, `1` on failure.
#[must_use]
pub fn run_client() -> ExitCode {
    init_tracing(Level::WARN);

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::from(1);
        }
    };
    tracing::info!("Chat endpoint: {} ({:?} mode)", config.endpoint, config.mode);

    let Some(rt) = runtime() else {
        return ExitCode::from(1);
    };

    if let Err(e) = rt.block_on(client::run(config)) {
        tracing::error!("Client error: {e:#}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Run the demo chat server (used by the `clonechat-server` binary) until Ctrl+C.
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run_server() -> ExitCode {
    init_tracing(Level::INFO);

    tracing::info!("Starting clonechat demo server v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env();
    let state = Arc::new(ServerState::new());

    let Some(rt) = runtime() else {
        return ExitCode::from(1);
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Ctrl+C handler failed: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutting down");
    };

    if let Err(e) = rt.block_on(server::run_server_with_shutdown(state, &config, shutdown)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
