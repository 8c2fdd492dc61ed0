//! The fixed-size pixel buffer every card is drawn on.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use tracing::debug;

use crate::ProcessError;
use crate::text::DrawSurface;

/// Output width in pixels.
pub const CANVAS_WIDTH: u32 = 1080;

/// Output height in pixels.
pub const CANVAS_HEIGHT: u32 = 1350;

/// A 1080x1350 RGBA buffer owned by a single request.
///
/// Remembers whether the source carried an alpha channel so the encoded PNG
/// keeps the source's colour type.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
    has_alpha: bool,
}

impl Canvas {
    /// Decode `bytes` (PNG, JPEG, GIF, WebP, BMP) and fit the result to the canvas.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProcessError> {
        let img = image::load_from_memory(bytes).map_err(ProcessError::Decode)?;
        Ok(Self::fit(&img))
    }

    /// Resize `img` to exactly 1080x1350 with Lanczos3, ignoring aspect ratio.
    pub fn fit(img: &DynamicImage) -> Self {
        let has_alpha = img.color().has_alpha();
        let (orig_w, orig_h) = (img.width(), img.height());

        let pixels = if (orig_w, orig_h) == (CANVAS_WIDTH, CANVAS_HEIGHT) {
            debug!("Image already at canvas size, skipping resize");
            img.to_rgba8()
        } else {
            debug!(
                orig_w,
                orig_h,
                new_width = CANVAS_WIDTH,
                new_height = CANVAS_HEIGHT,
                "Resizing image to canvas"
            );
            resample(img, has_alpha)
        };

        Self { pixels, has_alpha }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Encode as PNG with maximum compression.
    pub fn encode_png(&self) -> Result<Vec<u8>, ProcessError> {
        let (width, height) = self.pixels.dimensions();
        let mut bytes = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, PngFilter::Adaptive);

        let result = if self.has_alpha {
            encoder.write_image(self.pixels.as_raw(), width, height, ExtendedColorType::Rgba8)
        } else {
            let rgb = DynamicImage::ImageRgba8(self.pixels.clone()).to_rgb8();
            encoder.write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        };
        result.map_err(ProcessError::Encode)?;

        debug!(bytes = bytes.len(), alpha = self.has_alpha, "Encoded canvas as PNG");
        Ok(bytes)
    }
}

/// Lanczos3 resize to the canvas size.
///
/// Sources with alpha are filtered in premultiplied form so the colour of
/// fully transparent pixels cannot bleed into visible edges.
fn resample(img: &DynamicImage, has_alpha: bool) -> RgbaImage {
    if !has_alpha {
        return img
            .resize_exact(CANVAS_WIDTH, CANVAS_HEIGHT, FilterType::Lanczos3)
            .to_rgba8();
    }

    let mut premultiplied = img.to_rgba8();
    for pixel in premultiplied.pixels_mut() {
        let a = pixel[3] as u32;
        for channel in &mut pixel.0[..3] {
            *channel = ((*channel as u32 * a + 127) / 255) as u8;
        }
    }

    let mut resized = imageops::resize(
        &premultiplied,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        FilterType::Lanczos3,
    );
    for pixel in resized.pixels_mut() {
        let a = pixel[3] as u32;
        if a == 0 {
            *pixel = Rgba([0, 0, 0, 0]);
            continue;
        }
        for channel in &mut pixel.0[..3] {
            *channel = ((*channel as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
    resized
}

impl<F: ?Sized> DrawSurface<F> for Canvas
where
    RgbaImage: DrawSurface<F>,
{
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: &F, color: Rgba<u8>) {
        self.pixels.draw_text(x, y, text, font, color);
    }
}
