use std::io::Cursor;

use image::{ImageFormat, RgbImage};

use crate::error::{HandscriptError, HandscriptResult};

/// Encode the final image as lossless PNG bytes.
pub fn png_bytes(image: &RgbImage) -> HandscriptResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| HandscriptError::Other(anyhow::Error::new(e)))?;
    Ok(buf.into_inner())
}
