use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::services::fetch::ImageFetcher;
use crate::services::font::FontSet;

/// Application shared state accessible from every axum handler.
///
/// Everything inside is immutable after startup; requests share nothing else.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    /// Font tiers, loaded once
    fonts: Arc<FontSet>,
    /// Outbound image downloader
    fetcher: Arc<dyn ImageFetcher>,
    /// Cancelled on Ctrl+C to drain both listeners
    shutdown_token: CancellationToken,
}

impl SharedState {
    pub fn new(config: AppConfig, fonts: FontSet, fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                fonts: Arc::new(fonts),
                fetcher,
                shutdown_token: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn fonts(&self) -> &Arc<FontSet> {
        &self.inner.fonts
    }

    pub fn fetcher(&self) -> &dyn ImageFetcher {
        self.inner.fetcher.as_ref()
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }
}
