//! Caption server binary.
//!
//! Starts the image processing server, the optional keep-alive listener,
//! and waits for Ctrl+C.

use tracing_subscriber::EnvFilter;

use caption_server_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting caption server");

    let state = caption_server_lib::init_foundation()?;
    let shutdown_token = state.shutdown_token().clone();

    let keep_alive_handle = if state.config().keep_alive_enabled {
        let addr = state.config().keep_alive_addr();
        let token = shutdown_token.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = server::start_keep_alive_server(addr, token).await {
                tracing::error!("Keep-alive server failed: {e:#}");
            }
        }))
    } else {
        tracing::info!("Keep-alive listener disabled");
        None
    };

    let server_state = state.clone();
    let mut server_handle = tokio::spawn(server::start_server(server_state));

    tracing::info!(
        port = state.server_port(),
        "Server running. Press Ctrl+C to stop."
    );

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Shutting down...");
            shutdown_token.cancel();
            server_handle.await??;
        }
        result = &mut server_handle => {
            shutdown_token.cancel();
            result??;
        }
    }

    if let Some(handle) = keep_alive_handle {
        handle.await?;
    }
    Ok(())
}
