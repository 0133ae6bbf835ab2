//! ESC/POS command frame builders.
//!
//! Stateless byte-level encoding: device initialization, raster image
//! blocks (`GS v 0`), paper feed, and partial cut.

use image::GrayImage;

/// Pixels darker than this pack as black.
const BLACK_THRESHOLD: u8 = 128;

/// `ESC @`: reset the device to its power-on state.
pub fn initialize() -> Vec<u8> {
    vec![0x1b, 0x40]
}

/// `ESC d n`: print buffered data and feed `n` lines.
pub fn feed(lines: u8) -> Vec<u8> {
    vec![0x1b, 0x64, lines]
}

/// `GS V B 0`: partial cut with no extra feed.
pub fn cut() -> Vec<u8> {
    vec![0x1d, 0x56, 0x42, 0x00]
}

/// `GS v 0`: encode a grayscale bitmap as one raster block.
///
/// Rows pack MSB-first, one bit per pixel, dark = 1, each row padded to a
/// whole number of bytes. The header carries bytes-per-row and row count
/// little-endian. The device appends the block at its vertical cursor.
pub fn raster(img: &GrayImage) -> Vec<u8> {
    let (w, h) = img.dimensions();
    let bytes_per_row = (w as usize).div_ceil(8);

    let mut frame = Vec::with_capacity(8 + bytes_per_row * h as usize);
    frame.extend_from_slice(&[0x1d, 0x76, 0x30, 0x00]);
    frame.extend_from_slice(&(bytes_per_row as u16).to_le_bytes());
    frame.extend_from_slice(&(h as u16).to_le_bytes());

    for y in 0..h {
        for byte_idx in 0..bytes_per_row as u32 {
            let mut packed = 0u8;
            for bit in 0..8 {
                let x = byte_idx * 8 + bit;
                if x < w && img.get_pixel(x, y).0[0] < BLACK_THRESHOLD {
                    packed |= 1 << (7 - bit);
                }
            }
            frame.push(packed);
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn initialize_is_esc_at() {
        assert_eq!(initialize(), vec![0x1b, 0x40]);
    }

    #[test]
    fn feed_carries_line_count() {
        assert_eq!(feed(4), vec![0x1b, 0x64, 0x04]);
    }

    #[test]
    fn cut_is_partial_with_no_feed() {
        assert_eq!(cut(), vec![0x1d, 0x56, 0x42, 0x00]);
    }

    #[test]
    fn raster_header_layout() {
        let img = GrayImage::from_pixel(512, 72, Luma([255]));
        let frame = raster(&img);

        assert_eq!(&frame[0..4], &[0x1d, 0x76, 0x30, 0x00]);
        // 512 px / 8 = 64 bytes per row
        assert_eq!(u16::from_le_bytes([frame[4], frame[5]]), 64);
        assert_eq!(u16::from_le_bytes([frame[6], frame[7]]), 72);
        assert_eq!(frame.len(), 8 + 64 * 72);
    }

    #[test]
    fn white_packs_to_zero_black_to_ones() {
        let white = GrayImage::from_pixel(8, 1, Luma([255]));
        assert_eq!(raster(&white)[8..], [0x00]);

        let black = GrayImage::from_pixel(8, 1, Luma([0]));
        assert_eq!(raster(&black)[8..], [0xff]);
    }

    #[test]
    fn packing_is_msb_first() {
        // Only the leftmost pixel dark
        let mut img = GrayImage::from_pixel(8, 1, Luma([255]));
        img.put_pixel(0, 0, Luma([0]));
        assert_eq!(raster(&img)[8..], [0x80]);
    }

    #[test]
    fn ragged_width_pads_with_white() {
        // 10 px -> 2 bytes per row; 6 trailing pad bits stay 0
        let img = GrayImage::from_pixel(10, 2, Luma([0]));
        let frame = raster(&img);

        assert_eq!(u16::from_le_bytes([frame[4], frame[5]]), 2);
        assert_eq!(frame[8..], [0xff, 0xc0, 0xff, 0xc0]);
    }

    #[test]
    fn threshold_splits_midtones() {
        let mut img = GrayImage::from_pixel(8, 1, Luma([BLACK_THRESHOLD]));
        img.put_pixel(0, 0, Luma([BLACK_THRESHOLD - 1]));
        // 127 prints black, 128 prints white
        assert_eq!(raster(&img)[8..], [0x80]);
    }
}
