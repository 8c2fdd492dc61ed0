use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::card::FontTiers;
use crate::text::{DrawSurface, FontMetric, TextExtent};

pub(crate) const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Monospace stand-in for a real face: every char advances the same amount
/// and every non-empty run has the same height.
#[derive(Debug, Clone)]
pub(crate) struct FixedAdvance {
    advance: u32,
    height: u32,
}

impl FixedAdvance {
    pub(crate) fn new(advance: u32, height: u32) -> Self {
        Self { advance, height }
    }
}

impl FontMetric for FixedAdvance {
    fn measure(&self, text: &str) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        TextExtent {
            width: text.chars().count() as u32 * self.advance,
            height: self.height,
        }
    }
}

/// Paints the measured box of each run so tests can probe pixels.
impl DrawSurface<FixedAdvance> for RgbaImage {
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: &FixedAdvance, color: Rgba<u8>) {
        let TextExtent { width, height } = font.measure(text);
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                let (px, py) = (x + dx, y + dy);
                if px >= 0 && py >= 0 && (px as u32) < self.width() && (py as u32) < self.height() {
                    self.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DrawCall {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) text: String,
    pub(crate) color: Rgba<u8>,
}

/// Surface that only remembers what was drawn where.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) calls: Vec<DrawCall>,
}

impl Recorder {
    pub(crate) fn texts(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.text.as_str()).collect()
    }
}

impl<F: ?Sized> DrawSurface<F> for Recorder {
    fn draw_text(&mut self, x: i32, y: i32, text: &str, _font: &F, color: Rgba<u8>) {
        self.calls.push(DrawCall {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }
}

/// Fixed-advance fonts whose height equals the tier's pixel size.
pub(crate) fn tiers() -> FontTiers<FixedAdvance> {
    FontTiers::from_fn(|tier| {
        let px = tier.px() as u32;
        FixedAdvance::new(px / 2, px)
    })
}

pub(crate) fn png_bytes(img: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}
