pub mod api;
pub mod router;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::app::SharedState;

/// Start the image processing server.
pub async fn start_server(state: SharedState) -> Result<()> {
    let addr = state.config().server_addr();
    let shutdown_token = state.shutdown_token().clone();
    let app = router::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind server address {addr}"))?;
    tracing::info!("Caption server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move { shutdown_token.cancelled().await })
        .await?;

    Ok(())
}

/// Start the liveness listener used by external uptime monitors.
///
/// Runs on its own port and task so it keeps answering while the main
/// server is busy.
pub async fn start_keep_alive_server(addr: String, shutdown_token: CancellationToken) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind keep-alive address {addr}"))?;
    tracing::info!("Keep-alive listening on http://{}", addr);

    axum::serve(listener, router::create_keep_alive_router())
        .with_graceful_shutdown(async move { shutdown_token.cancelled().await })
        .await?;

    Ok(())
}
