//! Image preparation pipeline for thermal receipt printing.
//!
//! Decodes a submitted image, corrects EXIF orientation, rescales it to the
//! printer's printable width, dithers it to two levels, and slices the
//! result into height-bounded raster segments ready for transmission.

pub mod dither;
pub mod normalize;
pub mod scale;
pub mod segment;

// Re-exports for convenience
pub use dither::floyd_steinberg_dither;
pub use normalize::{Orientation, decode_and_orient};
pub use scale::scale_to_width;
pub use segment::{RasterSegment, Segments, segments};

/// Errors that can occur while preparing an image for printing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("maximum segment height must be greater than 0")]
    InvalidSegmentHeight,
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
