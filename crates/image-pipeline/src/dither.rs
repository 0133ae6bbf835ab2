//! Floyd-Steinberg error-diffusion dithering.
//!
//! The printer renders one bit per pixel; diffusing quantization error
//! keeps midtones readable after thresholding.

use image::{GrayImage, Luma};
use tracing::debug;

/// Binarization threshold.
const THRESHOLD: i16 = 128;

/// Dither a grayscale image down to pure black and white.
///
/// Every output pixel is 0 or 255. Quantization error diffuses to
/// unvisited neighbors with the classic weights:
/// - Right:        7/16
/// - Bottom-left:  3/16
/// - Bottom:       5/16
/// - Bottom-right: 1/16
pub fn floyd_steinberg_dither(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    debug!(width, height, "Dithering image");

    let w = width as usize;
    let h = height as usize;
    // i16 working buffer so diffused error can go out of the u8 range
    let mut buf: Vec<i16> = img.pixels().map(|p| i16::from(p.0[0])).collect();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let old = buf[idx];
            let new = if old >= THRESHOLD { 255 } else { 0 };
            buf[idx] = new;
            let err = old - new;

            if x + 1 < w {
                buf[idx + 1] += err * 7 / 16;
            }
            if y + 1 < h {
                if x > 0 {
                    buf[idx + w - 1] += err * 3 / 16;
                }
                buf[idx + w] += err * 5 / 16;
                if x + 1 < w {
                    buf[idx + w + 1] += err / 16;
                }
            }
        }
    }

    GrayImage::from_fn(width, height, |x, y| {
        Luma([buf[y as usize * w + x as usize].clamp(0, 255) as u8])
    })
}
