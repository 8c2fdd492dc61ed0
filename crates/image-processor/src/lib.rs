//! Image composition for captioned social cards.
//!
//! Decodes a source image, fits it to a fixed 1080x1350 canvas, optionally
//! alpha-composites a second image over it, and draws word-wrapped text
//! blocks before encoding the result as PNG. Nothing here performs I/O.

pub mod canvas;
pub mod card;
pub mod compose;
pub mod text;

#[cfg(test)]
pub(crate) mod test_util;

// Re-exports for convenience
pub use canvas::{CANVAS_HEIGHT, CANVAS_WIDTH, Canvas};
pub use card::{FontTier, FontTiers, bullet_card, bullet_points, headline_card, overlay_card};
pub use text::{DrawSurface, FontMetric, Line, ScaledFont, TextBlock, TextExtent, wrap_text};

/// Errors raised while turning source bytes into an encoded card.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("cannot identify image file: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),
}
