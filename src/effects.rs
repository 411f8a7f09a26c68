use image::RgbaImage;
use rand::Rng;

use crate::{config::InkColor, font::GlyphFont, raster};

/// Descenders drawn slightly above the baseline when the overlap effect is
/// active, mimicking cursive flow.
const DESCENDERS: [char; 3] = ['y', 'g', 'j'];
/// Vertical lift applied to descenders.
const OVERLAP_LIFT: f32 = 0.5;
/// Alpha for interior characters when the fade effect is active.
const FADE_ALPHA: u8 = 180;
/// Leading and trailing run of characters the fade effect leaves opaque.
const FADE_MARGIN: usize = 5;
/// Bounds for the per-character retrace probability.
const RETRACE_MIN: f32 = 0.08;
const RETRACE_MAX: f32 = 0.4;

/// Perturb a line start position by a uniform integer offset in
/// `[-magnitude, +magnitude]` on each axis, sampled independently.
pub fn jitter<R: Rng>(pos: (i64, i64), magnitude: i32, rng: &mut R) -> (i64, i64) {
    let m = magnitude.max(0) as i64;
    (
        pos.0 + rng.random_range(-m..=m),
        pos.1 + rng.random_range(-m..=m),
    )
}

/// Draw one line of text onto the canvas, mutating it in place.
///
/// Characters advance left to right by `ink_width - 1`, crowding letters by a
/// pixel the way handwriting does. Three per-character effects apply:
///
/// - overlap: descenders ({y, g, j}, case-insensitive) lift half a pixel;
/// - fade: characters past the first [`FADE_MARGIN`] and before the last
///   [`FADE_MARGIN`] drop to alpha [`FADE_ALPHA`];
/// - retrace: with a probability re-sampled per character from
///   `[RETRACE_MIN, RETRACE_MAX)`, the glyph draws again half a pixel to the
///   right, like a pen going back over a stroke.
///
/// An empty line is a no-op. Draws are forward-only compositing; there is no
/// undo.
#[allow(clippy::too_many_arguments)]
pub fn render_line<R: Rng>(
    canvas: &mut RgbaImage,
    line: &str,
    pos: (i64, i64),
    font: &dyn GlyphFont,
    ink: InkColor,
    overlap: bool,
    fade: bool,
    rng: &mut R,
) {
    let len = line.chars().count();
    let baseline = pos.1 as f32 + font.ascent();
    let mut x = pos.0 as f32;

    for (idx, ch) in line.chars().enumerate() {
        let y = if overlap && DESCENDERS.contains(&ch.to_ascii_lowercase()) {
            baseline - OVERLAP_LIFT
        } else {
            baseline
        };
        let color = if fade && idx >= FADE_MARGIN && idx + FADE_MARGIN < len {
            ink.with_alpha(FADE_ALPHA)
        } else {
            ink
        };

        draw_glyph(canvas, font, ch, x, y, color);
        let retrace = rng.random_range(RETRACE_MIN..RETRACE_MAX);
        if rng.random::<f32>() < retrace {
            draw_glyph(canvas, font, ch, x + 0.5, y, color);
        }

        x += (font.ink_width(ch) - 1) as f32;
    }
}

fn draw_glyph(
    canvas: &mut RgbaImage,
    font: &dyn GlyphFont,
    ch: char,
    pen_x: f32,
    baseline: f32,
    ink: InkColor,
) {
    let raster = font.raster(ch);
    if raster.width == 0 || raster.height == 0 {
        return;
    }
    let x = pen_x + raster.bearing_left as f32;
    let y = baseline - (raster.height as i32 + raster.bearing_bottom) as f32;
    raster::blit_glyph(canvas, &raster, x, y, ink);
}
