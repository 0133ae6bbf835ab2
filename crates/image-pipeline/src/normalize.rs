//! Image decoding with EXIF orientation correction.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use crate::{PipelineError, Result};

/// Rotation derived from the EXIF Orientation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    /// Map a raw EXIF orientation value to a rotation.
    ///
    /// Only the pure-rotation values are honored: 3 (upside down),
    /// 6 (rotate 90 CW to display), 8 (rotate 270 CW to display).
    /// Mirrored variants and out-of-range values map to `Identity`.
    pub fn from_exif(value: u32) -> Self {
        match value {
            3 => Orientation::Rotate180,
            6 => Orientation::Rotate90,
            8 => Orientation::Rotate270,
            _ => Orientation::Identity,
        }
    }
}

/// Decode raw image bytes into an upright bitmap.
///
/// Orientation metadata is read before decoding; the stored rotation is
/// applied once, with canvas dimensions expanded to fit. Absent or
/// unparseable metadata is not an error: the image is used as decoded.
pub fn decode_and_orient(bytes: &[u8]) -> Result<DynamicImage> {
    let orientation = read_orientation(bytes);

    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PipelineError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| PipelineError::Decode(e.to_string()))?;

    debug!(
        width = img.width(),
        height = img.height(),
        ?orientation,
        "Decoded image"
    );

    Ok(apply_orientation(img, orientation))
}

/// Read the EXIF Orientation tag from an encoded image.
///
/// Returns `Identity` when the container carries no parseable metadata.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from_exif)
            .unwrap_or_default(),
        Err(_) => Orientation::Identity,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Identity => img,
        Orientation::Rotate90 => img.rotate90(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::Rotate270 => img.rotate270(),
    }
}
