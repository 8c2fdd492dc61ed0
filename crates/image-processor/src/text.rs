//! Text layout and rendering.
//!
//! Layout and drawing are two separate passes: [`wrap_text`] splits a string
//! into lines that fit a pixel width, then [`render_lines`] stacks those lines
//! top to bottom on a [`DrawSurface`].

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::debug;

/// Vertical gap added below every rendered line, in pixels.
pub const LINE_GUTTER: i32 = 10;

/// Measured size of a run of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

/// A font face bound to a pixel size.
pub trait FontMetric {
    fn measure(&self, text: &str) -> TextExtent;
}

/// Something text can be drawn onto with a font of type `F`.
pub trait DrawSurface<F: ?Sized> {
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: &F, color: Rgba<u8>);
}

/// An `ab_glyph` face at a fixed pixel size.
#[derive(Clone)]
pub struct ScaledFont {
    font: FontArc,
    scale: PxScale,
}

impl ScaledFont {
    pub fn new(font: FontArc, px: f32) -> Self {
        Self {
            font,
            scale: PxScale::from(px),
        }
    }

    pub fn px(&self) -> f32 {
        self.scale.y
    }

    /// Lowest inked row of `text`, measured from the draw origin.
    ///
    /// Glyphs sit on a baseline `ascent` below the origin, the same placement
    /// `draw_text_mut` uses, so the result covers the ascender offset plus
    /// any descender depth. Text without ink measures zero.
    fn ink_bottom(&self, text: &str) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = 0.0;
        let mut bottom = 0.0f32;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            let glyph = id.with_scale_and_position(self.scale, point(caret, scaled.ascent()));
            caret += scaled.h_advance(id);
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                bottom = bottom.max(outlined.px_bounds().max.y);
            }
        }
        bottom.ceil() as u32
    }
}

impl std::fmt::Debug for ScaledFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaledFont").field("px", &self.px()).finish()
    }
}

impl FontMetric for ScaledFont {
    fn measure(&self, text: &str) -> TextExtent {
        let (width, _) = text_size(self.scale, &self.font, text);
        TextExtent {
            width,
            height: self.ink_bottom(text),
        }
    }
}

impl DrawSurface<ScaledFont> for RgbaImage {
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: &ScaledFont, color: Rgba<u8>) {
        draw_text_mut(self, color, x, y, font.scale, &font.font, text);
    }
}

/// One wrapped row of words.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    words: Vec<String>,
}

impl Line {
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The words joined by single spaces, as drawn.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(String::is_empty)
    }
}

impl<S: Into<String>> FromIterator<S> for Line {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Greedy word wrap.
///
/// Words are split strictly on `' '`, so consecutive spaces produce empty
/// words that survive into the joined line text. A word is moved to a new
/// line only when appending it would exceed `max_width` and the current line
/// already holds something; a single over-long word therefore sits alone on
/// its own line instead of being broken. The trailing line is always emitted,
/// so empty input yields exactly one empty line.
///
/// A `max_width` of zero puts every word on its own line.
pub fn wrap_text<F: FontMetric + ?Sized>(text: &str, font: &F, max_width: u32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for word in text.split(' ') {
        let overflows = max_width == 0 || {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current.join(" "), word)
            };
            font.measure(&candidate).width > max_width
        };

        if overflows && !current.is_empty() {
            lines.push(Line {
                words: std::mem::take(&mut current),
            });
        }
        current.push(word.to_string());
    }

    lines.push(Line { words: current });
    lines
}

/// Draw `lines` top to bottom starting at `origin`.
///
/// Each line advances the pen by its own measured height plus [`LINE_GUTTER`].
pub fn render_lines<F, S>(surface: &mut S, lines: &[Line], origin: (i32, i32), font: &F, color: Rgba<u8>)
where
    F: FontMetric + ?Sized,
    S: DrawSurface<F> + ?Sized,
{
    let (x, mut y) = origin;
    for line in lines {
        let text = line.text();
        surface.draw_text(x, y, &text, font, color);
        let height = font.measure(&text).height as i32;
        y += height + LINE_GUTTER;
    }
}

/// A paragraph plus everything needed to place it.
#[derive(Debug)]
pub struct TextBlock<'a, F: ?Sized> {
    pub content: &'a str,
    pub font: &'a F,
    pub origin: (i32, i32),
    pub max_width: u32,
    pub color: Rgba<u8>,
}

impl<'a, F: FontMetric + ?Sized> TextBlock<'a, F> {
    pub fn layout(&self) -> Vec<Line> {
        wrap_text(self.content, self.font, self.max_width)
    }

    /// Wrap the content, then draw it onto `surface`.
    pub fn draw<S: DrawSurface<F> + ?Sized>(&self, surface: &mut S) {
        let lines = self.layout();
        debug!(
            x = self.origin.0,
            y = self.origin.1,
            lines = lines.len(),
            "Drawing text block"
        );
        render_lines(surface, &lines, self.origin, self.font, self.color);
    }
}
