use image::RgbaImage;

use crate::{
    config::ResourceSource,
    error::{HandscriptError, HandscriptResult},
};

/// Decode the background image into straight-alpha RGBA8.
pub fn load_background(source: &ResourceSource) -> HandscriptResult<RgbaImage> {
    let decoded = match source {
        ResourceSource::Path(path) => image::open(path).map_err(|e| {
            HandscriptError::resource(format!("open background '{}': {e}", path.display()))
        })?,
        ResourceSource::Bytes(bytes) => image::load_from_memory(bytes)
            .map_err(|e| HandscriptError::resource(format!("decode background bytes: {e}")))?,
    };
    Ok(decoded.to_rgba8())
}

/// Read raw font bytes; parsing happens in [`crate::font::TtfFontSource`].
pub fn load_font_bytes(source: &ResourceSource) -> HandscriptResult<Vec<u8>> {
    match source {
        ResourceSource::Path(path) => std::fs::read(path).map_err(|e| {
            HandscriptError::resource(format!("read font '{}': {e}", path.display()))
        }),
        ResourceSource::Bytes(bytes) => Ok(bytes.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandscriptError;

    #[test]
    fn missing_background_is_resource_error() {
        let err = load_background(&ResourceSource::Path("no/such/paper.jpg".into())).unwrap_err();
        assert!(matches!(err, HandscriptError::Resource(_)));
    }

    #[test]
    fn undecodable_background_is_resource_error() {
        let err = load_background(&ResourceSource::Bytes(vec![0, 1, 2, 3])).unwrap_err();
        assert!(matches!(err, HandscriptError::Resource(_)));
    }

    #[test]
    fn background_bytes_roundtrip() {
        let white = image::RgbImage::from_pixel(8, 4, image::Rgb([255, 255, 255]));
        let png = crate::encode::png_bytes(&white).unwrap();
        let loaded = load_background(&ResourceSource::Bytes(png)).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (8, 4));
        assert_eq!(loaded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn missing_font_is_resource_error() {
        let err = load_font_bytes(&ResourceSource::Path("no/such/font.ttf".into())).unwrap_err();
        assert!(matches!(err, HandscriptError::Resource(_)));
    }

    #[test]
    fn font_bytes_pass_through() {
        let bytes = load_font_bytes(&ResourceSource::Bytes(vec![1, 2, 3])).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
