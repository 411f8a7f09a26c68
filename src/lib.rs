//! Synthetic handwriting rendering.
//!
//! `handscript` turns a block of plain text into a raster image that looks
//! like a handwritten page: wrapped, jittered, slightly tilted glyph strokes
//! composited onto a paper-texture background.
//!
//! The pipeline runs in four stages:
//!
//! - detect the writable (light) region of the paper ([`region`])
//! - pick the largest font size whose wrapped lines fit that region ([`layout`])
//! - draw each line with per-character jitter, retrace and fade ([`effects`])
//! - tilt the whole page and flatten it to opaque RGB ([`compose`])
//!
//! [`compose::compose`] is the one-shot entry point; [`compose::compose_seeded`]
//! produces byte-identical output for a fixed seed.
#![forbid(unsafe_code)]

pub mod assets;
pub mod compose;
pub mod config;
pub mod effects;
pub mod encode;
pub mod error;
pub mod font;
pub mod layout;
pub mod raster;
pub mod region;

pub use compose::{compose, compose_seeded, compose_with_font, compose_with_rng};
pub use config::{InkColor, RenderConfig, ResourceSource};
pub use encode::png_bytes;
pub use error::{HandscriptError, HandscriptResult};
pub use font::{FontSource, GlyphFont, GlyphRaster, TtfFont, TtfFontSource};
pub use layout::{Layout, plan};
pub use region::{SafeRegion, detect};
