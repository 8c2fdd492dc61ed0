//! The three card recipes: headline, bullet list, and overlay title.
//!
//! Every recipe decodes its source(s) onto a fresh [`Canvas`], draws white
//! text blocks at fixed positions, and returns PNG bytes.

use ab_glyph::FontArc;
use image::Rgba;

use crate::ProcessError;
use crate::canvas::Canvas;
use crate::compose;
use crate::text::{DrawSurface, FontMetric, ScaledFont, TextBlock};

/// Colour of every text block.
pub const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Left edge of every text block.
pub const TEXT_LEFT: i32 = 50;

/// Wrap width of every text block.
pub const TEXT_MAX_WIDTH: u32 = 980;

pub const HEADLINE_TOP: i32 = 200;
pub const BULLET_TOP: i32 = 200;

/// Fixed distance between bullet origins. Bullets do not reflow, so a long
/// bullet may run into the next one.
pub const BULLET_PITCH: i32 = 200;

pub const FOOTER_TOP: i32 = 1100;
pub const TITLE_TOP: i32 = 750;

const BULLET_PREFIX: &str = "• ";
const SENTENCE_DELIMITER: &str = ". ";

/// Named font sizes, all cut from the same face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontTier {
    Title,
    Main1,
    Main2,
    Footer,
}

impl FontTier {
    pub const ALL: [FontTier; 4] = [Self::Title, Self::Main1, Self::Main2, Self::Footer];

    /// Pixel size of the tier.
    pub fn px(self) -> f32 {
        match self {
            Self::Title => 50.0,
            Self::Main1 => 42.0,
            Self::Main2 => 32.0,
            Self::Footer => 25.0,
        }
    }
}

/// One font per [`FontTier`].
#[derive(Debug, Clone)]
pub struct FontTiers<F> {
    pub title: F,
    pub main_1: F,
    pub main_2: F,
    pub footer: F,
}

impl<F> FontTiers<F> {
    pub fn from_fn(mut make: impl FnMut(FontTier) -> F) -> Self {
        Self {
            title: make(FontTier::Title),
            main_1: make(FontTier::Main1),
            main_2: make(FontTier::Main2),
            footer: make(FontTier::Footer),
        }
    }

    pub fn get(&self, tier: FontTier) -> &F {
        match tier {
            FontTier::Title => &self.title,
            FontTier::Main1 => &self.main_1,
            FontTier::Main2 => &self.main_2,
            FontTier::Footer => &self.footer,
        }
    }
}

impl FontTiers<ScaledFont> {
    /// Bind `font` at every tier size.
    pub fn from_font(font: FontArc) -> Self {
        Self::from_fn(|tier| ScaledFont::new(font.clone(), tier.px()))
    }
}

fn block<'a, F: ?Sized>(content: &'a str, font: &'a F, top: i32) -> TextBlock<'a, F> {
    TextBlock {
        content,
        font,
        origin: (TEXT_LEFT, top),
        max_width: TEXT_MAX_WIDTH,
        color: TEXT_COLOR,
    }
}

/// Split `text` into bullet lines.
///
/// Sentences are separated by the literal `". "`. Blank sentences are
/// dropped; the rest are trimmed, prefixed with `"• "`, and end with exactly
/// one `'.'` (the last sentence usually brings its own).
///
/// A bullet never ends in `".."`: the period is appended only when the
/// sentence lacks one, so `"A. B."` gives `"• A."` and `"• B."`.
pub fn bullet_points(text: &str) -> Vec<String> {
    text.split(SENTENCE_DELIMITER)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(|sentence| {
            let terminator = if sentence.ends_with('.') { "" } else { "." };
            format!("{BULLET_PREFIX}{sentence}{terminator}")
        })
        .collect()
}

/// Main text at the main-1 size, then the footer.
pub fn draw_headline<F, S>(surface: &mut S, fonts: &FontTiers<F>, text: &str, footer: &str)
where
    F: FontMetric,
    S: DrawSurface<F> + ?Sized,
{
    block(text, &fonts.main_1, HEADLINE_TOP).draw(surface);
    draw_footer(surface, fonts, footer);
}

/// One block per bullet at a fixed pitch, then the footer.
pub fn draw_bullets<F, S>(surface: &mut S, fonts: &FontTiers<F>, text: &str, footer: &str)
where
    F: FontMetric,
    S: DrawSurface<F> + ?Sized,
{
    let mut y = BULLET_TOP;
    for bullet in bullet_points(text) {
        block(&bullet, &fonts.main_2, y).draw(surface);
        y += BULLET_PITCH;
    }
    draw_footer(surface, fonts, footer);
}

/// The overlay title at the title size.
pub fn draw_title<F, S>(surface: &mut S, fonts: &FontTiers<F>, title: &str)
where
    F: FontMetric,
    S: DrawSurface<F> + ?Sized,
{
    block(title, &fonts.title, TITLE_TOP).draw(surface);
}

fn draw_footer<F, S>(surface: &mut S, fonts: &FontTiers<F>, footer: &str)
where
    F: FontMetric,
    S: DrawSurface<F> + ?Sized,
{
    block(footer, &fonts.footer, FOOTER_TOP).draw(surface);
}

/// Source image, headline text, footer.
pub fn headline_card<F>(
    source: &[u8],
    fonts: &FontTiers<F>,
    text: &str,
    footer: &str,
) -> Result<Vec<u8>, ProcessError>
where
    F: FontMetric,
    Canvas: DrawSurface<F>,
{
    let mut canvas = Canvas::decode(source)?;
    draw_headline(&mut canvas, fonts, text, footer);
    canvas.encode_png()
}

/// Source image, bulleted sentences, footer.
pub fn bullet_card<F>(
    source: &[u8],
    fonts: &FontTiers<F>,
    text: &str,
    footer: &str,
) -> Result<Vec<u8>, ProcessError>
where
    F: FontMetric,
    Canvas: DrawSurface<F>,
{
    let mut canvas = Canvas::decode(source)?;
    draw_bullets(&mut canvas, fonts, text, footer);
    canvas.encode_png()
}

/// Background with an overlay image composited on top, then the title.
pub fn overlay_card<F>(
    background: &[u8],
    overlay: &[u8],
    fonts: &FontTiers<F>,
    title: &str,
) -> Result<Vec<u8>, ProcessError>
where
    F: FontMetric,
    Canvas: DrawSurface<F>,
{
    let mut canvas = Canvas::decode(background)?;
    let overlay = Canvas::decode(overlay)?;
    compose::composite(&mut canvas, &overlay);
    draw_title(&mut canvas, fonts, title);
    canvas.encode_png()
}
