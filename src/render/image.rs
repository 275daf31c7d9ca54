use image::{Rgb, RgbImage};

use crate::models::QrCode;

/// Render the QR code into an RGB image of roughly `target` pixels per side.
///
/// The module grid is scaled by a whole number of pixels and centered; if
/// `target` is smaller than the grid, one pixel per module is used, so the
/// returned image is never smaller than the bitmap. Black on white.
pub fn to_image(qr: &QrCode, target: u32) -> RgbImage {
    to_image_with_colors(qr, target, Rgb([0, 0, 0]), Rgb([255, 255, 255]))
}

/// Render with explicit foreground (dark) and background (light) colors
pub fn to_image_with_colors(
    qr: &QrCode,
    target: u32,
    foreground: Rgb<u8>,
    background: Rgb<u8>,
) -> RgbImage {
    let grid = qr.width() as u32;
    let size = target.max(grid);
    let pixels_per_module = size / grid;
    let offset = (size - grid * pixels_per_module) / 2;

    let mut img = RgbImage::from_pixel(size, size, background);
    for y in 0..grid {
        for x in 0..grid {
            if !qr.modules.get(x as usize, y as usize) {
                continue;
            }
            let left = offset + x * pixels_per_module;
            let top = offset + y * pixels_per_module;
            for py in top..top + pixels_per_module {
                for px in left..left + pixels_per_module {
                    img.put_pixel(px, py, foreground);
                }
            }
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode, ECLevel};

    #[test]
    fn test_image_dimensions() {
        let qr = encode(b"image render", ECLevel::M).unwrap();
        let img = to_image(&qr, 256);
        assert_eq!(img.width(), 256);
        assert_eq!(img.height(), 256);
    }

    #[test]
    fn test_small_target_clamps_to_grid() {
        let qr = encode(b"image render", ECLevel::M).unwrap();
        let img = to_image(&qr, 1);
        assert_eq!(img.width(), qr.width() as u32);
    }

    #[test]
    fn test_colors_and_quiet_zone() {
        let qr = encode(b"image render", ECLevel::M).unwrap();
        let fg = Rgb([10, 20, 30]);
        let bg = Rgb([200, 210, 220]);
        let img = to_image_with_colors(&qr, 290, fg, bg);
        // Corner pixel sits in the quiet zone
        assert_eq!(*img.get_pixel(0, 0), bg);
        // Some pixel must carry the foreground color
        assert!(img.pixels().any(|p| *p == fg));
    }
}
