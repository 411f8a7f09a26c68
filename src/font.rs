use std::sync::Arc;

use crate::{
    config::ResourceSource,
    error::{HandscriptError, HandscriptResult},
};

/// Coverage raster for a single glyph, row-major top-down, 0-255 per pixel.
#[derive(Clone, Debug)]
pub struct GlyphRaster {
    pub coverage: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Horizontal bearing from the pen position to the left edge of the raster.
    pub bearing_left: i32,
    /// Offset of the raster's bottom edge relative to the baseline.
    pub bearing_bottom: i32,
}

/// An immutable typeface instantiated at a fixed pixel size.
///
/// All queries are per-character; there is no shaping or kerning beyond the
/// bounding-box widths the renderer advances by.
pub trait GlyphFont {
    /// Nominal pixel size the face was instantiated at.
    fn px(&self) -> u32;

    /// Distance from the line top to the baseline.
    fn ascent(&self) -> f32;

    /// Ascent-to-descent extent of one line.
    fn line_height(&self) -> f32;

    /// Ink bounding-box width. Zero-ink glyphs (spaces) report their rounded
    /// advance width instead, so the renderer's cursor never walks backwards.
    fn ink_width(&self, ch: char) -> i32;

    /// Typographic advance width.
    fn advance(&self, ch: char) -> f32;

    /// Rasterized coverage for one character.
    fn raster(&self, ch: char) -> GlyphRaster;
}

/// Seam between the layout size search and a concrete typeface: instantiates
/// the face at each candidate pixel size.
pub trait FontSource {
    type Font: GlyphFont;

    fn load(&self, px: u32) -> HandscriptResult<Self::Font>;
}

/// TTF/OTF-backed [`FontSource`]. Parsing happens once; instantiating a size
/// is cheap.
#[derive(Clone)]
pub struct TtfFontSource {
    face: Arc<fontdue::Font>,
}

impl TtfFontSource {
    pub fn from_bytes(bytes: &[u8]) -> HandscriptResult<Self> {
        let face = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| HandscriptError::resource(format!("parse font: {e}")))?;
        Ok(Self {
            face: Arc::new(face),
        })
    }

    pub fn from_source(source: &ResourceSource) -> HandscriptResult<Self> {
        let bytes = crate::assets::load_font_bytes(source)?;
        Self::from_bytes(&bytes)
    }
}

impl FontSource for TtfFontSource {
    type Font = TtfFont;

    fn load(&self, px: u32) -> HandscriptResult<TtfFont> {
        let line = self
            .face
            .horizontal_line_metrics(px as f32)
            .ok_or_else(|| HandscriptError::resource("font has no horizontal line metrics"))?;
        Ok(TtfFont {
            face: Arc::clone(&self.face),
            px,
            ascent: line.ascent,
            descent: line.descent,
        })
    }
}

/// A parsed face fixed at one pixel size.
pub struct TtfFont {
    face: Arc<fontdue::Font>,
    px: u32,
    ascent: f32,
    /// Negative, per font conventions.
    descent: f32,
}

impl GlyphFont for TtfFont {
    fn px(&self) -> u32 {
        self.px
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn line_height(&self) -> f32 {
        self.ascent - self.descent
    }

    fn ink_width(&self, ch: char) -> i32 {
        let metrics = self.face.metrics(ch, self.px as f32);
        if metrics.width > 0 {
            metrics.width as i32
        } else {
            metrics.advance_width.round() as i32
        }
    }

    fn advance(&self, ch: char) -> f32 {
        self.face.metrics(ch, self.px as f32).advance_width
    }

    fn raster(&self, ch: char) -> GlyphRaster {
        let (metrics, coverage) = self.face.rasterize(ch, self.px as f32);
        GlyphRaster {
            coverage,
            width: metrics.width as u32,
            height: metrics.height as u32,
            bearing_left: metrics.xmin,
            bearing_bottom: metrics.ymin,
        }
    }
}

/// Measure the rendered extent of a line block: widest line by advance widths,
/// total height with `spacing` pixels between lines.
pub fn measure_block(font: &dyn GlyphFont, lines: &[String], spacing: u32) -> (u32, u32) {
    let mut width = 0f32;
    for line in lines {
        let w: f32 = line.chars().map(|ch| font.advance(ch)).sum();
        width = width.max(w);
    }
    let n = lines.len() as u32;
    let height = if n == 0 {
        0.0
    } else {
        n as f32 * font.line_height() + (n.saturating_sub(1) * spacing) as f32
    };
    (width.ceil() as u32, height.ceil() as u32)
}
