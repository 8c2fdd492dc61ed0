//! Outbound image downloads.

use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("fetching {url} failed with status {status}")]
    Status { url: String, status: u16 },
}

/// Downloads the raw bytes behind a URL.
pub trait ImageFetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>>;
}

/// `reqwest`-backed fetcher shared by every request.
#[derive(Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Build the client. TLS certificates are verified unless the config
    /// explicitly opts out.
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for image fetches");
        }
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;
        Ok(Self { http })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        async move {
            let resp = self.http.get(url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            let bytes = resp.bytes().await?;
            tracing::debug!(url, bytes = bytes.len(), "Fetched image");
            Ok(bytes.to_vec())
        }
        .boxed()
    }
}
