use crate::{
    error::HandscriptResult,
    font::{FontSource, GlyphFont, measure_block},
};

/// Largest candidate pixel size.
pub const SIZE_MAX: u32 = 70;
/// Smallest candidate pixel size, also the fallback size.
pub const SIZE_MIN: u32 = 22;
/// Descending search step.
const SIZE_STEP: usize = 2;
/// Inter-line spacing used for fit measurement.
const MEASURE_SPACING: u32 = 20;
/// Average glyph advance relative to pixel size; turns the box width into a
/// character budget without measuring text per candidate width.
const ADVANCE_FACTOR: f32 = 0.55;

/// A wrapped line set tied to exactly one chosen font size.
///
/// Empty strings are paragraph breaks and keep their vertical slot.
pub struct Layout<F> {
    pub font: F,
    pub lines: Vec<String>,
}

/// Pick the largest font size in `[SIZE_MIN, SIZE_MAX]` whose wrapped lines
/// fit `max_width` x `max_height`, together with that wrapping.
///
/// Candidates descend by two, so the first fit is the largest fit. When no
/// candidate fits, the smallest size comes back with the text split only on
/// explicit newlines; text content never makes this fail, only a font source
/// that cannot load.
pub fn plan<S: FontSource>(
    text: &str,
    source: &S,
    max_width: u32,
    max_height: u32,
) -> HandscriptResult<Layout<S::Font>> {
    for px in (SIZE_MIN..=SIZE_MAX).rev().step_by(SIZE_STEP) {
        let font = source.load(px)?;
        let budget = (max_width as f32 / (px as f32 * ADVANCE_FACTOR)) as usize;
        let lines = wrap_text(text, budget.max(1));
        let (w, h) = measure_block(&font, &lines, MEASURE_SPACING);
        if w <= max_width && h <= max_height {
            tracing::debug!(px, lines = lines.len(), "layout fits");
            return Ok(Layout { font, lines });
        }
    }

    tracing::debug!("no candidate size fits; falling back to unwrapped text");
    let font = source.load(SIZE_MIN)?;
    let lines = text.split('\n').map(str::to_owned).collect();
    Ok(Layout { font, lines })
}

/// Split on explicit newlines, keep whitespace-only paragraphs as single
/// empty lines, and greedily word-wrap the rest to `width` characters.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for para in text.split('\n') {
        if para.trim().is_empty() {
            lines.push(String::new());
        } else {
            wrap_paragraph(para, width, &mut lines);
        }
    }
    lines
}

fn wrap_paragraph(para: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0usize;
    for word in para.split_whitespace() {
        let mut rest = word;
        loop {
            let rest_len = rest.chars().count();
            let sep = if current_len == 0 { 0 } else { 1 };
            if current_len + sep + rest_len <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(rest);
                current_len += sep + rest_len;
                break;
            }
            if current_len > 0 {
                out.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            // A single word wider than the budget hard-splits at the boundary.
            let cut = rest
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            out.push(rest[..cut].to_owned());
            rest = &rest[cut..];
            if rest.is_empty() {
                break;
            }
        }
    }
    if current_len > 0 {
        out.push(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{GlyphRaster, measure_block};

    /// Fixed-metric face: advance is half the pixel size, line height is the
    /// pixel size. Keeps fit arithmetic exact for assertions.
    struct FixedFont {
        px: u32,
    }

    impl GlyphFont for FixedFont {
        fn px(&self) -> u32 {
            self.px
        }

        fn ascent(&self) -> f32 {
            self.px as f32 * 0.8
        }

        fn line_height(&self) -> f32 {
            self.px as f32
        }

        fn ink_width(&self, _ch: char) -> i32 {
            (self.px / 2) as i32
        }

        fn advance(&self, _ch: char) -> f32 {
            self.px as f32 * 0.5
        }

        fn raster(&self, _ch: char) -> GlyphRaster {
            let side = self.px / 2;
            GlyphRaster {
                coverage: vec![255; (side * side) as usize],
                width: side,
                height: side,
                bearing_left: 0,
                bearing_bottom: 0,
            }
        }
    }

    struct FixedSource;

    impl FontSource for FixedSource {
        type Font = FixedFont;

        fn load(&self, px: u32) -> crate::HandscriptResult<FixedFont> {
            Ok(FixedFont { px })
        }
    }

    #[test]
    fn wrap_keeps_blank_paragraphs_as_empty_lines() {
        assert_eq!(wrap_text("Hi\n\nBye", 40), vec!["Hi", "", "Bye"]);
        assert_eq!(wrap_text("Hi\n   \nBye", 40), vec!["Hi", "", "Bye"]);
    }

    #[test]
    fn wrap_is_greedy_by_words() {
        assert_eq!(
            wrap_text("aa bb cc dd", 5),
            vec!["aa bb", "cc dd"] // "aa bb" fills exactly five chars
        );
        assert_eq!(wrap_text("one two three", 8), vec!["one two", "three"]);
    }

    #[test]
    fn wrap_hard_splits_long_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("hi abcdefgh", 4), vec!["hi", "abcd", "efgh"]);
    }

    #[test]
    fn wrap_collapses_internal_whitespace() {
        assert_eq!(wrap_text("a   b\tc", 10), vec!["a b c"]);
    }

    #[test]
    fn plan_prefers_the_largest_fit() {
        // Tall box: one line of four chars. Height alone constrains the
        // search (width fits at any size), so the chosen size is the largest
        // whose single line height fits.
        let layout = plan("abcd", &FixedSource, 10_000, 65).unwrap();
        assert_eq!(layout.font.px(), 64);
        assert_eq!(layout.lines, vec!["abcd"]);

        // The largest-fit-first guarantee: every larger candidate must fail.
        for px in (66..=SIZE_MAX).step_by(2) {
            let font = FixedFont { px };
            let (_, h) = measure_block(&font, &layout.lines, 20);
            assert!(h > 65);
        }
    }

    #[test]
    fn plan_size_is_always_in_range() {
        let layout = plan("some words here", &FixedSource, 400, 400).unwrap();
        assert!((SIZE_MIN..=SIZE_MAX).contains(&layout.font.px()));

        let (w, h) = measure_block(&layout.font, &layout.lines, 20);
        assert!(w <= 400 && h <= 400);
    }

    #[test]
    fn plan_falls_back_to_smallest_unwrapped() {
        // A box too small for any candidate.
        let text = "line one\nline two";
        let layout = plan(text, &FixedSource, 10, 10).unwrap();
        assert_eq!(layout.font.px(), SIZE_MIN);
        assert_eq!(layout.lines, vec!["line one", "line two"]);
    }

    #[test]
    fn plan_handles_empty_text() {
        let layout = plan("", &FixedSource, 400, 400).unwrap();
        assert_eq!(layout.lines, vec![String::new()]);
    }
}
