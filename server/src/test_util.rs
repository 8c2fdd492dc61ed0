use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use image_processor::{DrawSurface, FontMetric, FontTiers, TextExtent};

use crate::services::fetch::{FetchError, ImageFetcher};

/// Fixed-advance face so tests do not need a font file.
#[derive(Debug, Clone)]
pub(crate) struct BlockFont {
    px: u32,
}

impl FontMetric for BlockFont {
    fn measure(&self, text: &str) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        TextExtent {
            width: text.chars().count() as u32 * self.px / 2,
            height: self.px,
        }
    }
}

impl DrawSurface<BlockFont> for RgbaImage {
    fn draw_text(&mut self, _x: i32, _y: i32, _text: &str, _font: &BlockFont, _color: Rgba<u8>) {}
}

pub(crate) fn block_fonts() -> Arc<FontTiers<BlockFont>> {
    Arc::new(FontTiers::from_fn(|tier| BlockFont {
        px: tier.px() as u32,
    }))
}

/// In-memory fetcher that counts every call, hit or miss.
#[derive(Default)]
pub(crate) struct CountingFetcher {
    images: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub(crate) fn with(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.images.insert(url.to_string(), bytes);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageFetcher for CountingFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .images
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            });
        async move { result }.boxed()
    }
}

pub(crate) fn solid_png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([30, 60, 90])));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}
