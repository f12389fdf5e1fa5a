//! Demo chat server.
//!
//! Implements the chat wire contract with canned replies so the client can
//! be exercised without a real backend. Routes:
//! - `POST /chat`
//! - `GET /health`
//! - `GET /status`

pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::ServerState;

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{Method, header};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::config::ServerConfig;

/// Bind the configured port on all interfaces and serve the chat contract
/// until `shutdown` resolves.
///
/// # Errors
/// Returns the I/O error if the port cannot be bound or serving fails.
pub async fn run_server_with_shutdown<F>(
    state: Arc<ServerState>,
    config: &ServerConfig,
    shutdown: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    // Browser clients post JSON from any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(Arc::clone(&state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], config.port))).await?;
    tracing::info!("Demo chat server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Served {} chat requests", state.requests_served());
    Ok(())
}
