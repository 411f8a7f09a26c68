use image::{Rgb, RgbImage, Rgba, RgbaImage, imageops};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

use crate::{config::InkColor, font::GlyphRaster};

/// Straight-alpha source-over.
fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let a = f32::from(src[3]) / 255.0;
    if a <= 0.0 {
        return dst;
    }
    let inv = 1.0 - a;
    let channel = |s: u8, d: u8| -> u8 {
        (f32::from(s) * a + f32::from(d) * inv)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (f32::from(src[3]) + f32::from(dst[3]) * inv)
            .round()
            .clamp(0.0, 255.0) as u8,
    ])
}

/// Composite a glyph coverage mask onto the canvas at a fractional position.
///
/// Coverage is distributed over the 2x2 pixel neighborhood by linear
/// weighting, so sub-pixel offsets (the 0.5 px retrace and descender shifts)
/// stay visible instead of snapping to the grid. Draws clip at the canvas
/// edges; out-of-bounds glyphs are partially or fully dropped.
pub fn blit_glyph(canvas: &mut RgbaImage, raster: &GlyphRaster, x: f32, y: f32, ink: InkColor) {
    if raster.width == 0 || raster.height == 0 {
        return;
    }
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x.floor();
    let fy = y - y.floor();
    let (w, h) = (raster.width as i64, raster.height as i64);

    let coverage = |cx: i64, cy: i64| -> f32 {
        if cx < 0 || cy < 0 || cx >= w || cy >= h {
            0.0
        } else {
            raster.coverage[(cy * w + cx) as usize] as f32
        }
    };

    for dy in 0..=h {
        let py = y0 + dy;
        if py < 0 || py >= canvas.height() as i64 {
            continue;
        }
        for dx in 0..=w {
            let px = x0 + dx;
            if px < 0 || px >= canvas.width() as i64 {
                continue;
            }
            let c = coverage(dx, dy) * (1.0 - fx) * (1.0 - fy)
                + coverage(dx - 1, dy) * fx * (1.0 - fy)
                + coverage(dx, dy - 1) * (1.0 - fx) * fy
                + coverage(dx - 1, dy - 1) * fx * fy;
            if c <= 0.0 {
                continue;
            }
            let alpha = (c * ink.a as f32 / 255.0).round().min(255.0) as u8;
            if alpha == 0 {
                continue;
            }
            let (px, py) = (px as u32, py as u32);
            let dst = *canvas.get_pixel(px, py);
            canvas.put_pixel(px, py, blend(dst, Rgba([ink.r, ink.g, ink.b, alpha])));
        }
    }
}

/// Rotate by `degrees` about the center, with the canvas grown to the rotated
/// bounding box so nothing crops; uncovered corners take `fill`.
///
/// Output dimensions never shrink below the input's. A zero angle is an
/// identity copy, skipping resampling entirely.
pub fn rotate_expanded(image: &RgbaImage, degrees: f32, fill: Rgba<u8>) -> RgbaImage {
    if degrees == 0.0 {
        return image.clone();
    }
    let theta = degrees.to_radians();
    let (cos, sin) = (theta.cos().abs(), theta.sin().abs());
    let (w, h) = (image.width() as f32, image.height() as f32);
    let out_w = ((w * cos + h * sin).ceil() as u32).max(image.width());
    let out_h = ((w * sin + h * cos).ceil() as u32).max(image.height());

    let mut canvas = RgbaImage::from_pixel(out_w, out_h, fill);
    let dx = ((out_w - image.width()) / 2) as i64;
    let dy = ((out_h - image.height()) / 2) as i64;
    imageops::overlay(&mut canvas, image, dx, dy);
    rotate_about_center(&canvas, theta, Interpolation::Bicubic, fill)
}

/// Drop the alpha channel for the final opaque output.
pub fn flatten(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        Rgb([r, g, b])
    })
}
