//! Image composition utilities: alpha blending and opaque paste.

use image::{Rgba, RgbaImage};

use crate::canvas::Canvas;

/// Lay `overlay` over `base` at the origin.
///
/// An overlay with an alpha channel is blended using its own alpha as the
/// mask; an opaque overlay replaces every pixel it covers.
pub fn composite(base: &mut Canvas, overlay: &Canvas) {
    if overlay.has_alpha() {
        alpha_composite(base.pixels_mut(), overlay.pixels());
    } else {
        paste(base.pixels_mut(), overlay.pixels());
    }
}

/// Blend `top` onto `base` at (0, 0), masked by `top`'s alpha.
///
/// All four channels are interpolated, so a fully transparent pixel leaves
/// the base untouched and a fully opaque one replaces it.
pub fn alpha_composite(base: &mut RgbaImage, top: &RgbaImage) {
    for (x, y, pixel) in top.enumerate_pixels() {
        if x >= base.width() || y >= base.height() {
            continue;
        }
        match pixel[3] {
            0 => {}
            255 => base.put_pixel(x, y, *pixel),
            alpha => {
                let bg = *base.get_pixel(x, y);
                base.put_pixel(x, y, blend_pixel(&bg, pixel, alpha));
            }
        }
    }
}

/// Copy `top` onto `base` at (0, 0) as fully opaque pixels.
pub fn paste(base: &mut RgbaImage, top: &RgbaImage) {
    for (x, y, pixel) in top.enumerate_pixels() {
        if x < base.width() && y < base.height() {
            base.put_pixel(x, y, Rgba([pixel[0], pixel[1], pixel[2], 255]));
        }
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = u32::from(alpha);
    let inv = 255 - a;
    let mix = |f: u8, b: u8| ((u32::from(f) * a + u32::from(b) * inv + 127) / 255) as u8;
    Rgba([
        mix(fg[0], bg[0]),
        mix(fg[1], bg[1]),
        mix(fg[2], bg[2]),
        mix(fg[3], bg[3]),
    ])
}
