use image::RgbaImage;

/// Luma above which a pixel counts as blank paper.
const BLANK_LUMA: u32 = 200;

/// Writable sub-area of the rotated background, in pixel coordinates.
///
/// Invariant: `right >= left` and `bottom >= top`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafeRegion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl SafeRegion {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Tight bounding box of light ("blank paper") pixels.
///
/// Luminance is Rec. 601 integer luma. When no pixel qualifies (an all-dark
/// image), the full image bounds come back instead; this never fails.
pub fn detect(image: &RgbaImage) -> SafeRegion {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        if luma > BLANK_LUMA {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((l, t, r0, b0)) => (l.min(x), t.min(y), r0.max(x), b0.max(y)),
            });
        }
    }
    match bounds {
        Some((left, top, right, bottom)) => SafeRegion {
            left,
            top,
            right,
            bottom,
        },
        None => SafeRegion {
            left: 0,
            top: 0,
            right: image.width(),
            bottom: image.height(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const DARK: Rgba<u8> = Rgba([10, 10, 10, 255]);
    const PAPER: Rgba<u8> = Rgba([240, 240, 240, 255]);

    #[test]
    fn single_light_pixel_is_its_own_box() {
        let mut img = RgbaImage::from_pixel(16, 16, DARK);
        img.put_pixel(3, 5, PAPER);
        let region = detect(&img);
        assert_eq!(
            region,
            SafeRegion {
                left: 3,
                top: 5,
                right: 3,
                bottom: 5
            }
        );
    }

    #[test]
    fn box_is_tight_around_light_rect() {
        let mut img = RgbaImage::from_pixel(32, 32, DARK);
        for y in 4..12 {
            for x in 6..20 {
                img.put_pixel(x, y, PAPER);
            }
        }
        let region = detect(&img);
        assert_eq!(
            region,
            SafeRegion {
                left: 6,
                top: 4,
                right: 19,
                bottom: 11
            }
        );
        assert_eq!(region.width(), 13);
        assert_eq!(region.height(), 7);
    }

    #[test]
    fn all_dark_image_degrades_to_full_bounds() {
        let img = RgbaImage::from_pixel(24, 12, DARK);
        assert_eq!(
            detect(&img),
            SafeRegion {
                left: 0,
                top: 0,
                right: 24,
                bottom: 12
            }
        );
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        // Gray (200,200,200) has luma exactly 200 and stays excluded.
        let mut img = RgbaImage::from_pixel(8, 8, DARK);
        img.put_pixel(1, 1, Rgba([200, 200, 200, 255]));
        assert_eq!(detect(&img).right, 8);

        img.put_pixel(2, 2, Rgba([201, 201, 201, 255]));
        let region = detect(&img);
        assert_eq!(
            region,
            SafeRegion {
                left: 2,
                top: 2,
                right: 2,
                bottom: 2
            }
        );
    }
}
