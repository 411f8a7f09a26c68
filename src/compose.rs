use image::{RgbImage, Rgba, RgbaImage, imageops};
use rand::{Rng, SeedableRng as _};
use rand_chacha::ChaCha8Rng;

use crate::{
    assets,
    config::RenderConfig,
    effects,
    error::HandscriptResult,
    font::{FontSource, GlyphFont},
    layout::{self, Layout},
    raster, region,
};

/// General padding inset from the detected safe region.
const PAD: i64 = 40;
/// Extra left inset reserved for margin rules and binding.
const LEFT_RESERVE: i64 = 200;
/// Extra top inset below the paper's top edge.
const TOP_RESERVE: i64 = 100;
/// Rightward widening of the box; the detector underestimates usable width on
/// ruled paper.
const RIGHT_EXTEND: i64 = 600;
/// Every fifth line indents, giving the page a paragraph rhythm.
const INDENT_PERIOD: usize = 5;
const INDENT_PX: i64 = 25;
/// Vertical lead beyond the font size: blank lines breathe more.
const BLANK_LEAD: i64 = 25;
const LINE_LEAD: i64 = 12;
/// Per-line probabilities for the overlap and fade effects.
const OVERLAP_P: f32 = 0.85;
const FADE_P: f32 = 0.3;

/// Render with a fresh OS-entropy seed.
pub fn compose(cfg: &RenderConfig) -> HandscriptResult<RgbImage> {
    let mut rng = ChaCha8Rng::from_os_rng();
    compose_with_rng(cfg, &mut rng)
}

/// Render reproducibly: a fixed seed gives byte-identical output.
pub fn compose_seeded(cfg: &RenderConfig, seed: u64) -> HandscriptResult<RgbImage> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    compose_with_rng(cfg, &mut rng)
}

/// Render using the caller's random source and the font named by the config.
pub fn compose_with_rng<R: Rng>(cfg: &RenderConfig, rng: &mut R) -> HandscriptResult<RgbImage> {
    cfg.validate()?;
    let source = crate::font::TtfFontSource::from_source(&cfg.font)?;
    compose_with_font(cfg, &source, rng)
}

/// Full pipeline against an explicit [`FontSource`].
///
/// Load background, quarter-turn into the vertical writing orientation,
/// detect the writable region, plan the layout, draw each line with effects,
/// tilt, flatten. Fails only on resource or validation errors; text content
/// degrades to the smallest font rather than erroring.
#[tracing::instrument(skip_all, fields(text_len = cfg.text.len()))]
pub fn compose_with_font<S: FontSource, R: Rng>(
    cfg: &RenderConfig,
    source: &S,
    rng: &mut R,
) -> HandscriptResult<RgbImage> {
    cfg.validate()?;

    let background = assets::load_background(&cfg.background)?;
    // Quarter-turn: landscape paper photo into the vertical writing
    // orientation, canvas swapped to fit.
    let mut canvas: RgbaImage = imageops::rotate90(&background);

    let paper = region::detect(&canvas);
    let left = paper.left as i64 + PAD + LEFT_RESERVE;
    let top = paper.top as i64 + PAD + TOP_RESERVE;
    let right = paper.right as i64 + RIGHT_EXTEND - PAD;
    let bottom = paper.bottom as i64 - PAD;
    let max_width = (right - left).max(1) as u32;
    let max_height = (bottom - top).max(1) as u32;

    let Layout { font, lines } = layout::plan(&cfg.text, source, max_width, max_height)?;
    tracing::debug!(px = font.px(), lines = lines.len(), "layout chosen");

    let mut y = top;
    for (i, line) in lines.iter().enumerate() {
        let indent = if i % INDENT_PERIOD == 0 { INDENT_PX } else { 0 };
        let pos = effects::jitter((left + indent, y), cfg.jitter_px, rng);
        let overlap = rng.random::<f32>() < OVERLAP_P;
        let fade = rng.random::<f32>() < FADE_P;
        effects::render_line(&mut canvas, line, pos, &font, cfg.ink, overlap, fade, rng);

        if lines.get(i + 1).is_some_and(|next| next.trim().is_empty()) {
            // Pen wander ahead of a paragraph gap. Sampled but intentionally
            // unapplied: the next line starts back at the margin.
            let _nudge: (i64, i64) = (rng.random_range(20..=60), rng.random_range(3..=10));
        }

        y += font.px() as i64
            + if line.trim().is_empty() {
                BLANK_LEAD
            } else {
                LINE_LEAD
            };
    }

    let tilt = if cfg.tilt_degrees > 0.0 {
        rng.random_range(-cfg.tilt_degrees..cfg.tilt_degrees)
    } else {
        0.0
    };
    let tilted = raster::rotate_expanded(&canvas, tilt, Rgba([255, 255, 255, 255]));
    Ok(raster::flatten(&tilted))
}
