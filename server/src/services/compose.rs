//! Request-level composition: fetch the sources, then build the card on the
//! blocking pool.

use std::sync::Arc;

use image_processor::{Canvas, DrawSurface, FontMetric, FontTiers, ProcessError, card};

use super::fetch::{FetchError, ImageFetcher};

/// Everything that can go wrong while serving one processing request.
///
/// Every variant is reported to the client as a 400 with its message.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("Missing required data")]
    MissingData,

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("image task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A validated processing request, one variant per endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionRequest {
    /// `/process-image1`: headline text and a footer over one image.
    Headline {
        image_url: String,
        text: String,
        footer: String,
    },
    /// `/process-image2`: bulleted sentences and a footer over one image.
    Bullets {
        image_url: String,
        text: String,
        footer: String,
    },
    /// `/process-image3`: an overlay image and a title over a background.
    Overlay {
        background_url: String,
        overlay_url: String,
        title: String,
    },
}

impl CompositionRequest {
    /// URLs that will be fetched, in fetch order.
    pub fn source_urls(&self) -> Vec<&str> {
        match self {
            Self::Headline { image_url, .. } | Self::Bullets { image_url, .. } => {
                vec![image_url.as_str()]
            }
            Self::Overlay {
                background_url,
                overlay_url,
                ..
            } => vec![background_url.as_str(), overlay_url.as_str()],
        }
    }
}

/// Fetch the request's images and render the card as PNG bytes.
///
/// Any failure aborts the whole request; no partial output is produced.
pub async fn compose<F>(
    fetcher: &dyn ImageFetcher,
    fonts: &Arc<FontTiers<F>>,
    request: CompositionRequest,
) -> Result<Vec<u8>, ComposeError>
where
    F: FontMetric + Send + Sync + 'static,
    Canvas: DrawSurface<F>,
{
    let fonts = Arc::clone(fonts);
    match request {
        CompositionRequest::Headline {
            image_url,
            text,
            footer,
        } => {
            let source = fetcher.fetch(&image_url).await?;
            run_blocking(move || card::headline_card(&source, &*fonts, &text, &footer)).await
        }
        CompositionRequest::Bullets {
            image_url,
            text,
            footer,
        } => {
            let source = fetcher.fetch(&image_url).await?;
            run_blocking(move || card::bullet_card(&source, &*fonts, &text, &footer)).await
        }
        CompositionRequest::Overlay {
            background_url,
            overlay_url,
            title,
        } => {
            let background = fetcher.fetch(&background_url).await?;
            let overlay = fetcher.fetch(&overlay_url).await?;
            run_blocking(move || card::overlay_card(&background, &overlay, &*fonts, &title)).await
        }
    }
}

async fn run_blocking<J>(job: J) -> Result<Vec<u8>, ComposeError>
where
    J: FnOnce() -> Result<Vec<u8>, ProcessError> + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(job).await??)
}
