//! Image processing endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use image_processor::{Canvas, DrawSurface, FontMetric, FontTiers};

use super::err_json;
use super::models::{BulletsBody, HeadlineBody, OverlayBody};
use crate::app::SharedState;
use crate::services::compose::{ComposeError, CompositionRequest, compose};
use crate::services::fetch::ImageFetcher;

/// The three processing routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Image1,
    Image2,
    Image3,
}

impl Endpoint {
    /// Route suffix used in log lines.
    pub fn number(self) -> u8 {
        match self {
            Self::Image1 => 1,
            Self::Image2 => 2,
            Self::Image3 => 3,
        }
    }

    /// Decode and validate a raw JSON body for this endpoint.
    pub fn parse(self, body: &[u8]) -> Result<CompositionRequest, ComposeError> {
        match self {
            Self::Image1 => serde_json::from_slice::<HeadlineBody>(body)?.into_request(),
            Self::Image2 => serde_json::from_slice::<BulletsBody>(body)?.into_request(),
            Self::Image3 => serde_json::from_slice::<OverlayBody>(body)?.into_request(),
        }
    }
}

/// POST /process-image1 – Headline card
pub async fn process_image_1(State(state): State<SharedState>, body: Bytes) -> Response {
    process(state.fetcher(), state.fonts(), Endpoint::Image1, &body).await
}

/// POST /process-image2 – Bullet card
pub async fn process_image_2(State(state): State<SharedState>, body: Bytes) -> Response {
    process(state.fetcher(), state.fonts(), Endpoint::Image2, &body).await
}

/// POST /process-image3 – Overlay card
pub async fn process_image_3(State(state): State<SharedState>, body: Bytes) -> Response {
    process(state.fetcher(), state.fonts(), Endpoint::Image3, &body).await
}

/// Validate, fetch, render. Any failure becomes a 400 with the error message.
pub(crate) async fn process<F>(
    fetcher: &dyn ImageFetcher,
    fonts: &Arc<FontTiers<F>>,
    endpoint: Endpoint,
    body: &[u8],
) -> Response
where
    F: FontMetric + Send + Sync + 'static,
    Canvas: DrawSurface<F>,
{
    let result = async {
        let request = endpoint.parse(body)?;
        for url in request.source_urls() {
            tracing::info!(image = endpoint.number(), url, "Fetching source image");
        }
        compose(fetcher, fonts, request).await
    }
    .await;

    match result {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(err) => {
            tracing::error!("Error processing image {}: {err}", endpoint.number());
            err_json(400, &err.to_string()).into_response()
        }
    }
}
