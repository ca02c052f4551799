//! HTTP server for idea-score (axum).
//!
//! Serves the stateless scoring gateway at `POST /validate-idea` and a server-rendered client at
//! `/` (intake form, results page). Every response carries permissive CORS headers and any
//! `OPTIONS` request is answered before routing.
//!
//! **Public API**: [`router`], [`run_serve`], [`run_serve_on_listener`], [`AppState`].

mod app;
mod page;
mod routes;

use std::future::Future;

use tokio::net::TcpListener;
use tracing::info;

pub use app::AppState;
pub use routes::{router, ALLOWED_HEADERS};

pub use config::DEFAULT_ADDR;

/// Serves on an existing listener until `shutdown` resolves. Tests bind 127.0.0.1:0 and pass the
/// listener in.
pub async fn run_serve_on_listener<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("idea-score listening on http://{}", addr);
    info!("gateway endpoint: http://{}/validate-idea", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

/// Binds `addr` (default [`DEFAULT_ADDR`]) and serves until `shutdown` resolves.
pub async fn run_serve<F>(
    addr: Option<&str>,
    state: AppState,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = addr.unwrap_or(DEFAULT_ADDR);
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, state, shutdown).await
}
