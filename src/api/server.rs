//! HTTP server setup: router and listener.

use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use super::state::ApiState;
use super::time;
use crate::error::{Error, Result};
use crate::store::TimeStore;

/// Build the router serving `/time` from the given state.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/time", get(time::get_time).post(time::set_time))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server on the given address.
///
/// The listener is bound before this returns, so the server is accepting
/// connections once the call resolves. Returns the bound address (useful
/// with port 0) and a handle that resolves when the server shuts down. The
/// caller flips `shutdown_rx` to `true` for graceful shutdown.
pub async fn start_http_server(
    bind: SocketAddr,
    store: TimeStore,
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
) -> Result<(SocketAddr, JoinHandle<std::io::Result<()>>)> {
    let app = router(Arc::new(ApiState::new(store)));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|source| Error::Bind { addr: bind, source })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| Error::Bind { addr: bind, source })?;
    tracing::info!(%local_addr, "HTTP server listening");

    let handle = tokio::spawn(async move {
        let mut shutdown = shutdown_rx;
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.wait_for(|v| *v).await;
            })
            .await;

        match &result {
            Ok(()) => tracing::info!(%local_addr, "HTTP server stopped"),
            Err(error) => tracing::error!(%local_addr, %error, "HTTP server failed"),
        }
        result
    });

    Ok((local_addr, handle))
}
