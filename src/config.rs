use std::path::PathBuf;

use crate::error::{HandscriptError, HandscriptResult};

/// Upper bound for the final-tilt range, in degrees.
pub const TILT_MAX_DEGREES: f32 = 5.0;
/// Upper bound for per-line jitter, in pixels.
pub const JITTER_MAX_PX: i32 = 6;

/// Straight-alpha ink color, constant for a full render.
///
/// The fade effect varies only the alpha channel; the RGB components never
/// change within one render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl InkColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same ink with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (case-insensitive, `#` optional).
    pub fn parse_hex(s: &str) -> HandscriptResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> HandscriptResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| HandscriptError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        match s.len() {
            6 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: 255,
            }),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err(HandscriptError::validation(
                "ink color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }
}

impl Default for InkColor {
    /// The classic fountain-pen blue used when no override is supplied.
    fn default() -> Self {
        Self::rgb(0x00, 0x00, 0x8a)
    }
}

impl<'de> serde::Deserialize<'de> for InkColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => InkColor::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(InkColor { r, g, b, a }),
        }
    }
}

/// Where a font or background comes from: a filesystem path or bytes already
/// in memory (e.g. an upload handled by the caller).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ResourceSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl From<PathBuf> for ResourceSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for ResourceSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Caller-supplied configuration for one render. Immutable for the duration
/// of a [`compose`](crate::compose::compose) call.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    /// Text to render; explicit newlines separate paragraphs.
    pub text: String,
    /// Typeface source (.ttf bytes or path).
    pub font: ResourceSource,
    /// Paper-texture background source.
    pub background: ResourceSource,
    /// Ink color; fade only varies its alpha.
    #[serde(default)]
    pub ink: InkColor,
    /// Final whole-page tilt is sampled from `[-tilt_degrees, +tilt_degrees]`.
    #[serde(default = "default_tilt")]
    pub tilt_degrees: f32,
    /// Per-line start-position jitter magnitude.
    #[serde(default = "default_jitter")]
    pub jitter_px: i32,
}

fn default_tilt() -> f32 {
    2.0
}

fn default_jitter() -> i32 {
    2
}

impl RenderConfig {
    pub fn validate(&self) -> HandscriptResult<()> {
        if !self.tilt_degrees.is_finite()
            || self.tilt_degrees < 0.0
            || self.tilt_degrees > TILT_MAX_DEGREES
        {
            return Err(HandscriptError::validation(format!(
                "tilt_degrees must be within [0, {TILT_MAX_DEGREES}]"
            )));
        }
        if self.jitter_px < 0 || self.jitter_px > JITTER_MAX_PX {
            return Err(HandscriptError::validation(format!(
                "jitter_px must be within [0, {JITTER_MAX_PX}]"
            )));
        }
        Ok(())
    }
}
