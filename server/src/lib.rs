pub mod app;
pub mod config;
pub mod server;
pub mod services;

#[cfg(test)]
pub(crate) mod test_util;

use std::sync::Arc;

use anyhow::Context;

use app::SharedState;
use config::AppConfig;
use services::fetch::HttpFetcher;
use services::font::load_font_set;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load config, fonts and the HTTP client, and bundle them into shared state.
pub fn init_foundation() -> Result<SharedState, anyhow::Error> {
    load_dotenv();

    let config = AppConfig::load()?;
    let fonts = load_font_set(&config.font_path)
        .with_context(|| format!("failed to load font from {}", config.font_path.display()))?;
    let fetcher = HttpFetcher::new(&config).context("failed to build HTTP client")?;

    tracing::info!(
        port = config.server_port,
        keep_alive_port = config.keep_alive_port,
        keep_alive_enabled = config.keep_alive_enabled,
        "Settings loaded"
    );
    Ok(SharedState::new(config, fonts, Arc::new(fetcher)))
}
