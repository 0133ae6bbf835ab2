//! Aspect-preserving resize to the printer's printable width.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

use crate::{PipelineError, Result};

/// Resize an image to exactly `width` pixels wide, preserving aspect ratio.
///
/// Output height is `round(h * width / w)`, clamped to at least one row.
/// Uses Lanczos3 filtering: receipt printers render one bit per pixel, so
/// resampling quality directly affects legibility of fine detail. Height is
/// unbounded; arbitrarily tall results are handled by the segmenter.
pub fn scale_to_width(img: &DynamicImage, width: u32) -> Result<DynamicImage> {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(PipelineError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let ratio = f64::from(width) / f64::from(w);
    let new_height = ((f64::from(h) * ratio).round() as u32).max(1);

    if w == width && h == new_height {
        debug!(width, "Image already at printable width, skipping resize");
        return Ok(img.clone());
    }

    debug!(
        from_w = w,
        from_h = h,
        to_w = width,
        to_h = new_height,
        "Scaling image to printable width"
    );

    Ok(img.resize_exact(width, new_height, FilterType::Lanczos3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn gray(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([128])))
    }

    #[test]
    fn downscales_preserving_aspect() {
        let result = scale_to_width(&gray(1024, 2048), 512).unwrap();
        assert_eq!(result.width(), 512);
        assert_eq!(result.height(), 1024);
    }

    #[test]
    fn upscales_preserving_aspect() {
        let result = scale_to_width(&gray(256, 100), 512).unwrap();
        assert_eq!(result.width(), 512);
        assert_eq!(result.height(), 200);
    }

    #[test]
    fn height_rounds_to_nearest() {
        // 100 * 512 / 300 = 170.67 -> 171
        let result = scale_to_width(&gray(300, 100), 512).unwrap();
        assert_eq!(result.height(), 171);
    }

    #[test]
    fn already_at_width_is_unchanged() {
        let result = scale_to_width(&gray(512, 300), 512).unwrap();
        assert_eq!((result.width(), result.height()), (512, 300));
    }

    #[test]
    fn tiny_height_clamps_to_one_row() {
        // 1 * 512 / 4096 rounds to 0; clamp keeps the bitmap non-empty
        let result = scale_to_width(&gray(4096, 1), 512).unwrap();
        assert_eq!(result.height(), 1);
    }

    #[test]
    fn zero_width_is_rejected() {
        let empty = DynamicImage::new_luma8(0, 0);
        let result = scale_to_width(&empty, 512);
        assert!(matches!(
            result,
            Err(PipelineError::InvalidDimensions { .. })
        ));
    }
}
