//! Seedbed Server - read-only HTTP API over the seeded content
//!
//! Provides:
//! - The welcome-guide lookup route (`GET /api/welcome-guides/by-slug/:slug`)
//! - CMS-style response and error envelopes
//! - Request id middleware for correlating failures

pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use axum::Router;
use seedbed_core::errors::{ExError, ExErrorKind, Result};

pub use error::ApiError;
pub use state::AppState;

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::welcome_guide::router())
        .layer(axum::middleware::from_fn(
            middleware::request_id::request_id_middleware,
        ))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped
///
/// # Errors
///
/// `Io` if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| server_io_error("bind", e))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| server_io_error("serve", e))
}

fn server_io_error(op: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(op)
        .with_message(err.to_string())
}
